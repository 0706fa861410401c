use contracts::domain::a002_member::aggregate::{InviteMemberDto, MemberDto, UpdateMemberDto};
use contracts::shared::api::ApiResult;
use contracts::shared::pagination::Paginated;

use crate::shared::api_client;
use crate::shared::api_utils::segment;
use crate::shared::pagination::FilterState;

/// One page of members; filters `search`, `role`, `status`
pub async fn fetch_members(filters: &FilterState) -> ApiResult<Paginated<MemberDto>> {
    api_client::get_page("/org/members", filters).await
}

pub async fn invite_member(dto: &InviteMemberDto) -> ApiResult<MemberDto> {
    api_client::post("/org/members/invite", dto).await
}

pub async fn update_member(id: &str, dto: &UpdateMemberDto) -> ApiResult<MemberDto> {
    api_client::put(&format!("/org/members/{}", segment(id)), dto).await
}

pub async fn delete_member(id: &str) -> ApiResult<()> {
    api_client::delete(&format!("/org/members/{}", segment(id))).await
}
