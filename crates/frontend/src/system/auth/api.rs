use contracts::shared::api::ApiResult;
use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};

use crate::shared::api_client;

/// Login with email and password
pub async fn login(email: String, password: String) -> ApiResult<LoginResponse> {
    let request = LoginRequest { email, password };
    api_client::post("/auth/login", &request).await
}

/// Exchange the refresh token for a new access token
pub async fn refresh_token(refresh_token: String) -> ApiResult<RefreshResponse> {
    let request = RefreshRequest { refresh_token };
    api_client::post("/auth/refresh", &request).await
}

/// Logout (revoke refresh token)
pub async fn logout(refresh_token: String) -> ApiResult<()> {
    let request = RefreshRequest { refresh_token };
    api_client::post_ack("/auth/logout", &request).await
}

/// Current user for the stored access token
pub async fn get_current_user() -> ApiResult<UserInfo> {
    api_client::get("/auth/me").await
}
