use serde::{Deserialize, Serialize};

const MAX_PAGE_SIZE: u32 = 100;

/// One page of data plus the paging bookkeeping the frontend needs
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
	pub page:  u32,
	pub size:  u32,
	pub total: i64,

	pub data: T,
}

/// Paging parameters as they arrive in a query string
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
	#[serde(default = "page_default")]
	pub page: u32,
	#[serde(default = "size_default")]
	pub size: u32,
}

const fn page_default() -> u32 { 1 }

const fn size_default() -> u32 { 20 }

impl Default for PageQuery {
	fn default() -> Self { Self { page: 1, size: 20 } }
}

impl PageQuery {
	/// Wrap a page of data in a [`Paginated`] envelope
	pub fn paginate<T>(&self, total: i64, data: T) -> Paginated<T> {
		Paginated { page: self.page.max(1), size: self.size(), total, data }
	}

	fn size(&self) -> u32 { self.size.clamp(1, MAX_PAGE_SIZE) }

	/// The SQL LIMIT value of these parameters
	#[inline]
	#[must_use]
	pub fn limit(&self) -> i64 { self.size().into() }

	/// The SQL OFFSET value of these parameters
	#[inline]
	#[must_use]
	pub fn offset(&self) -> i64 {
		i64::from(self.page.max(1) - 1) * self.limit()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn limit_and_offset_follow_the_page() {
		let query = PageQuery { page: 3, size: 20 };

		assert_eq!(query.limit(), 20);
		assert_eq!(query.offset(), 40);
	}

	#[test]
	fn size_is_clamped() {
		let query = PageQuery { page: 1, size: 100_000 };

		assert_eq!(query.limit(), i64::from(MAX_PAGE_SIZE));

		let query = PageQuery { page: 0, size: 0 };

		assert_eq!(query.limit(), 1);
		assert_eq!(query.offset(), 0);
	}
}
