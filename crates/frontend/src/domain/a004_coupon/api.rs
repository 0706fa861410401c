use contracts::domain::a004_coupon::aggregate::{CouponDto, CouponFormDto};
use contracts::shared::api::ApiResult;
use contracts::shared::pagination::Paginated;

use crate::shared::api_client;
use crate::shared::api_utils::segment;
use crate::shared::pagination::FilterState;

fn base(event_id: &str) -> String {
    format!("/events/admin/coupon/{}", segment(event_id))
}

fn item(event_id: &str, id: &str) -> String {
    format!("{}/{}", base(event_id), segment(id))
}

/// One page of coupons; filters `search`, `active`
pub async fn fetch_coupons(event_id: &str, filters: &FilterState) -> ApiResult<Paginated<CouponDto>> {
    api_client::get_page(&base(event_id), filters).await
}

pub async fn create_coupon(event_id: &str, dto: &CouponFormDto) -> ApiResult<CouponDto> {
    api_client::post(&base(event_id), dto).await
}

pub async fn update_coupon(event_id: &str, id: &str, dto: &CouponFormDto) -> ApiResult<CouponDto> {
    api_client::put(&item(event_id, id), dto).await
}

/// Flips `active` server-side and returns the stored coupon.
pub async fn toggle_coupon(event_id: &str, id: &str) -> ApiResult<CouponDto> {
    api_client::patch(&format!("{}/toggle", item(event_id, id))).await
}

pub async fn delete_coupon(event_id: &str, id: &str) -> ApiResult<()> {
    api_client::delete(&item(event_id, id)).await
}
