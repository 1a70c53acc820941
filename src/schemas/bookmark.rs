use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkToggleResponse {
	pub spot_id:    i32,
	pub bookmarked: bool,
}
