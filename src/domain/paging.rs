use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Default page size for member listings
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Upper bound on requested page sizes
pub const MAX_PAGE_SIZE: u32 = 100;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// Whitelisted sort keys for member listings
///
/// Sort input arrives on the query string; mapping it through this enum
/// is what keeps raw text out of the ORDER BY clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Username,
    Age,
    Id,
}

impl SortKey {
    pub fn as_column(&self) -> &'static str {
        match self {
            SortKey::Username => "username",
            SortKey::Age => "age",
            SortKey::Id => "id",
        }
    }
}

/// A sort key with direction, e.g. `username,desc`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub key: SortKey,
    pub direction: Direction,
}

impl Sort {
    pub fn by(key: SortKey, direction: Direction) -> Self {
        Self { key, direction }
    }

    /// Parses `key[,asc|desc]` as it appears on the query string
    ///
    /// # Returns
    /// * `Ok(Sort)` - For a whitelisted key and valid direction
    /// * `Err(String)` - For anything else
    pub fn parse(input: &str) -> Result<Self, String> {
        let mut parts = input.split(',').map(str::trim);

        let key = match parts.next() {
            Some("username") => SortKey::Username,
            Some("age") => SortKey::Age,
            Some("id") => SortKey::Id,
            Some(other) => return Err(format!("Unknown sort key: {}", other)),
            None => return Err("Empty sort expression".to_string()),
        };

        let direction = match parts.next() {
            None | Some("asc") => Direction::Asc,
            Some("desc") => Direction::Desc,
            Some(other) => return Err(format!("Unknown sort direction: {}", other)),
        };

        Ok(Self { key, direction })
    }
}

/// A page request: zero-based page number, page size, and sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: Sort,
}

impl PageRequest {
    /// Creates a page request. Size is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn of(page: u32, size: u32, sort: Sort) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> Sort {
        self.sort
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }
}

impl Default for PageRequest {
    /// First page of five, sorted by username ascending
    fn default() -> Self {
        Self::of(0, DEFAULT_PAGE_SIZE, Sort::default())
    }
}

/// One page of results plus the count metadata needed to render pagers
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    content: Vec<T>,
    number: u32,
    size: u32,
    total_elements: i64,
}

impl<T> Page<T> {
    /// Builds a page from one content query and one count query
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        Self {
            content,
            number: request.page(),
            size: request.size(),
            total_elements,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn total_elements(&self) -> i64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> u32 {
        // size is at least 1 by PageRequest construction
        ((self.total_elements + i64::from(self.size) - 1) / i64::from(self.size)) as u32
    }

    pub fn is_first(&self) -> bool {
        self.number == 0
    }

    pub fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages()
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    /// Maps the content, keeping the paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

impl<T: Serialize> Serialize for Page<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Page", 8)?;
        state.serialize_field("content", &self.content)?;
        state.serialize_field("number", &self.number)?;
        state.serialize_field("size", &self.size)?;
        state.serialize_field("total_elements", &self.total_elements)?;
        state.serialize_field("total_pages", &self.total_pages())?;
        state.serialize_field("first", &self.is_first())?;
        state.serialize_field("last", &self.is_last())?;
        state.serialize_field("has_next", &self.has_next())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_key_and_direction() {
        let sort = Sort::parse("username,desc").expect("valid sort");
        assert_eq!(sort.key, SortKey::Username);
        assert_eq!(sort.direction, Direction::Desc);
    }

    #[test]
    fn parse_key_only_defaults_ascending() {
        let sort = Sort::parse("age").expect("valid sort");
        assert_eq!(sort.key, SortKey::Age);
        assert_eq!(sort.direction, Direction::Asc);
    }

    #[test]
    fn parse_rejects_unknown_key() {
        assert!(Sort::parse("password,desc").is_err());
    }

    #[test]
    fn parse_rejects_unknown_direction() {
        assert!(Sort::parse("username,sideways").is_err());
    }

    #[test]
    fn page_request_clamps_size() {
        assert_eq!(PageRequest::of(0, 0, Sort::default()).size(), 1);
        assert_eq!(
            PageRequest::of(0, MAX_PAGE_SIZE + 1, Sort::default()).size(),
            MAX_PAGE_SIZE
        );
    }

    #[test]
    fn offset_is_page_times_size() {
        let request = PageRequest::of(2, 5, Sort::default());
        assert_eq!(request.offset(), 10);
        assert_eq!(request.limit(), 5);
    }

    #[test]
    fn first_page_of_five_by_three() {
        let request = PageRequest::of(0, 3, Sort::default());
        let page = Page::new(vec!["a", "b", "c"], &request, 5);

        assert_eq!(page.content().len(), 3);
        assert_eq!(page.number(), 0);
        assert_eq!(page.total_elements(), 5);
        assert_eq!(page.total_pages(), 2);
        assert!(page.is_first());
        assert!(page.has_next());
        assert!(!page.is_last());
    }

    #[test]
    fn last_page_has_no_next() {
        let request = PageRequest::of(1, 3, Sort::default());
        let page = Page::new(vec!["d", "e"], &request, 5);

        assert!(!page.is_first());
        assert!(!page.has_next());
        assert!(page.is_last());
    }

    #[test]
    fn empty_page_has_zero_pages() {
        let request = PageRequest::of(0, 3, Sort::default());
        let page = Page::<&str>::new(vec![], &request, 0);

        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next());
        assert!(page.is_last());
    }

    #[test]
    fn map_keeps_metadata() {
        let request = PageRequest::of(0, 3, Sort::default());
        let page = Page::new(vec![1, 2, 3], &request, 5).map(|n| n * 10);

        assert_eq!(page.content(), &[10, 20, 30]);
        assert_eq!(page.total_elements(), 5);
        assert_eq!(page.total_pages(), 2);
    }

    #[test]
    fn serializes_page_envelope() {
        let request = PageRequest::of(0, 3, Sort::default());
        let page = Page::new(vec![1, 2, 3], &request, 5);

        let json = serde_json::to_value(&page).expect("serializable");

        assert_eq!(json["content"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["total_elements"], 5);
        assert_eq!(json["total_pages"], 2);
        assert_eq!(json["first"], true);
        assert_eq!(json["has_next"], true);
    }
}
