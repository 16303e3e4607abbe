use serde::{Deserialize, Serialize};

/// Page envelope returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(rename = "pageSize", default)]
    pub page_size: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> Paginated<T> {
    pub fn is_last_page(&self) -> bool {
        if self.page_size == 0 {
            return true;
        }
        u64::from(self.page) * u64::from(self.page_size) >= self.total
    }
}
