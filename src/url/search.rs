//! Search URL construction

use url::Url;

/// Builds the URL of one result page
///
/// The keyword and offset are appended to any query the base already carries
/// as `word={keyword}&pn={offset}`, percent-encoded.
///
/// # Example
///
/// ```
/// use image_spider::url::build_search_url;
/// use url::Url;
///
/// let base = Url::parse("https://images.example.com/search?tn=img").unwrap();
/// let url = build_search_url(&base, "red panda", 40);
/// assert_eq!(
///     url.as_str(),
///     "https://images.example.com/search?tn=img&word=red+panda&pn=40"
/// );
/// ```
pub fn build_search_url(base: &Url, keyword: &str, offset: u64) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("word", keyword)
        .append_pair("pn", &offset.to_string());
    url
}
