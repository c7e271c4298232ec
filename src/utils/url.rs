// src/utils/url.rs

//! URL manipulation utilities.

use url::Url;

use crate::error::Result;
use crate::models::QueryKey;

/// Image hosts whose URLs understand the `._V1_` resize suffix.
const RESIZABLE_HOSTS: [&str; 2] = ["amazon.com", "imdb.com"];

const SCALE_MARKER: &str = "._V1_";
const UNSCALED_MARKER: &str = "._V1_.";

/// Rewrite a poster URL so the image host serves it at `width` pixels.
///
/// # Examples
/// ```
/// use tag_catalog::utils::url::resize_poster;
///
/// assert_eq!(
///     resize_poster("https://m.media-amazon.com/images/M/abc._V1_.jpg", 250),
///     "https://m.media-amazon.com/images/M/abc._V1_SX250.jpg"
/// );
/// ```
pub fn resize_poster(poster_url: &str, width: u32) -> String {
    if !RESIZABLE_HOSTS.iter().any(|host| poster_url.contains(host)) {
        return poster_url.to_string();
    }

    if poster_url.contains(UNSCALED_MARKER) {
        return poster_url.replacen(UNSCALED_MARKER, &format!("._V1_SX{width}."), 1);
    }

    if let Some(idx) = poster_url.find(SCALE_MARKER) {
        let extension = poster_url.rsplit('.').next().unwrap_or_default();
        return format!("{}._V1_SX{width}.{extension}", &poster_url[..idx]);
    }

    poster_url.to_string()
}

/// URL of one list page for a query.
pub fn list_page_url(base_url: &str, key: &QueryKey, page: u32) -> Result<Url> {
    let mut url = Url::parse(base_url)?.join("/search/keyword/_ajax")?;
    url.query_pairs_mut()
        .append_pair("keywords", key.tag())
        .append_pair("sort", key.sort().query_param())
        .append_pair("mode", "detail")
        .append_pair("page", &page.to_string());
    Ok(url)
}

/// Human-facing keyword search page, sent as the Referer.
pub fn referer_url(base_url: &str, key: &QueryKey) -> Result<Url> {
    let mut url = Url::parse(base_url)?.join("/search/keyword")?;
    url.query_pairs_mut().append_pair("keywords", key.tag());
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortKey;

    #[test]
    fn test_resize_unscaled() {
        assert_eq!(
            resize_poster("https://images-na.ssl-images-amazon.com/images/M/image._V1_.jpg", 250),
            "https://images-na.ssl-images-amazon.com/images/M/image._V1_SX250.jpg"
        );
    }

    #[test]
    fn test_resize_scaled_keeps_extension() {
        assert_eq!(
            resize_poster(
                "https://m.media-amazon.com/images/M/image._V1_UX67_CR0,0,67,98_AL_.png",
                250
            ),
            "https://m.media-amazon.com/images/M/image._V1_SX250.png"
        );
    }

    #[test]
    fn test_resize_unknown_host_unchanged() {
        let url = "https://cdn.example.org/poster._V1_.jpg";
        assert_eq!(resize_poster(url, 250), url);
    }

    #[test]
    fn test_resize_without_marker_unchanged() {
        let url = "https://www.imdb.com/images/nopicture/poster.png";
        assert_eq!(resize_poster(url, 250), url);
    }

    #[test]
    fn test_list_page_url() {
        let key = QueryKey::new("Time Travel", SortKey::Rating).unwrap();
        let url = list_page_url("https://www.imdb.com", &key, 2).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.imdb.com/search/keyword/_ajax?keywords=time-travel&sort=user_rating%2Cdesc&mode=detail&page=2"
        );
    }

    #[test]
    fn test_list_page_url_encodes_url_keyword_once() {
        let tag =
            crate::models::tag_from_url("https://www.imdb.com/search/keyword?keywords=hero%2Cvillain")
                .unwrap();
        let key = QueryKey::new(&tag, SortKey::Popular).unwrap();
        let url = list_page_url("https://www.imdb.com", &key, 1).unwrap();

        assert!(url.as_str().contains("keywords=hero%2Cvillain&"));
        let keywords: Vec<_> = url
            .query_pairs()
            .filter(|(name, _)| name == "keywords")
            .map(|(_, value)| value.into_owned())
            .collect();
        assert_eq!(keywords, ["hero,villain"]);
    }

    #[test]
    fn test_referer_url() {
        let key = QueryKey::new("hero", SortKey::Popular).unwrap();
        let url = referer_url("https://www.imdb.com", &key).unwrap();
        assert_eq!(url.as_str(), "https://www.imdb.com/search/keyword?keywords=hero");
    }
}
