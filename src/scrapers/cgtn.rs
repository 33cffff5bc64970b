//! CGTN section page layout, shared by every section (sci-tech, china, ...).
//!
//! Section pages list stories as `.news-item` blocks: a lazily loaded teaser
//! image followed by a `.news-item-intro` holding the headline (`h3 > a` or
//! `a.news-headline`) and the publication time.

use super::Layout;
use once_cell::sync::Lazy;

pub(super) static LAYOUT: Lazy<Layout> = Lazy::new(|| {
    Layout::new(
        ".cg-header, #header",
        ".news-item-intro h3 a[href], .news-item-intro a.news-headline[href]",
        &["news-item", "news-item-intro"],
        ".news-item-time, .news-item-date, time",
        "img",
    )
});

#[cfg(test)]
mod tests {
    use crate::config::SourceConfig;
    use crate::error::ParseError;
    use crate::models::RawPage;
    use crate::scrapers::Extractor;

    const SCI_TECH: &str = r#"
<!DOCTYPE html>
<html>
<body>
  <div class="cg-header"><a href="/">CGTN</a></div>
  <div class="cg-main">
    <h2><a href="/sci-tech">Sci-Tech</a></h2>
    <div class="news-item">
      <div class="news-item-img">
        <img data-original="https://ui.cgtn.com/ui/img/a.jpg" src="/ui/img/placeholder.png">
      </div>
      <div class="news-item-intro">
        <h3><a class="news-headline" href="https://news.cgtn.com/news/2025-05-06/Chang-e-6-returns/index.html">Chang'e-6 returns
          samples from far side of the moon</a></h3>
        <time datetime="2025-05-06T08:15:00Z">2 hours ago</time>
      </div>
    </div>
    <div class="news-item">
      <div class="news-item-intro">
        <h3><a href="/news/2025-05-05/robotics/index.html">Humanoid robots run half marathon</a></h3>
        <span class="news-item-date">05/05/2025</span>
      </div>
    </div>
    <div class="news-item">
      <div class="news-item-intro">
        <h3><a href="/news/empty/index.html">   </a></h3>
      </div>
    </div>
  </div>
</body>
</html>
"#;

    fn source() -> SourceConfig {
        SourceConfig::new("CGTN", "https://www.cgtn.com/sci-tech", Extractor::Cgtn)
    }

    #[test]
    fn test_extracts_one_record_per_news_item() {
        let page = RawPage::html("https://www.cgtn.com/sci-tech", SCI_TECH);
        let records = Extractor::Cgtn.extract(&page, &source()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].title,
            "Chang'e-6 returns samples from far side of the moon"
        );
        assert_eq!(records[1].title, "Humanoid robots run half marathon");
    }

    #[test]
    fn test_item_fields() {
        let page = RawPage::html("https://www.cgtn.com/sci-tech", SCI_TECH);
        let records = Extractor::Cgtn.extract(&page, &source()).unwrap();

        let first = &records[0];
        assert_eq!(
            first.url.as_deref(),
            Some("https://news.cgtn.com/news/2025-05-06/Chang-e-6-returns/index.html")
        );
        assert_eq!(first.published_at.as_deref(), Some("2025-05-06T00:00:00"));
        assert_eq!(
            first.image_url.as_deref(),
            Some("https://ui.cgtn.com/ui/img/a.jpg")
        );

        let second = &records[1];
        assert_eq!(
            second.url.as_deref(),
            Some("https://www.cgtn.com/news/2025-05-05/robotics/index.html")
        );
        assert_eq!(second.published_at.as_deref(), Some("2025-05-05T00:00:00"));
        assert_eq!(second.image_url, None);
    }

    #[test]
    fn test_inline_markup_in_headline_is_joined_without_gaps() {
        let page = RawPage::html(
            "https://www.cgtn.com/sci-tech",
            r#"<html><body><div class="cg-header"></div>
            <div class="news-item"><div class="news-item-intro">
              <h3><a href="/news/moon">Chang<em>'e</em>-6 lands on the <b>moon</b>'s far side</a></h3>
              <span class="news-item-time"><span>May 6,</span> 2025</span>
            </div></div></body></html>"#,
        );
        let records = Extractor::Cgtn.extract(&page, &source()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Chang'e-6 lands on the moon's far side");
        assert_eq!(records[0].published_at.as_deref(), Some("2025-05-06T00:00:00"));
    }

    #[test]
    fn test_page_with_generic_header_only_is_parse_error() {
        let page = RawPage::html(
            "https://www.cgtn.com/china",
            "<html><body><header><h1>Just a moment...</h1></header></body></html>",
        );
        assert!(matches!(
            Extractor::Cgtn.extract(&page, &source()),
            Err(ParseError::MissingLandmark { .. })
        ));
    }

    #[test]
    fn test_section_name_comes_from_config() {
        let china = SourceConfig::new("CGTN China", "https://www.cgtn.com/china", Extractor::Cgtn);
        let page = RawPage::html("https://www.cgtn.com/china", SCI_TECH);
        let records = Extractor::Cgtn.extract(&page, &china).unwrap();
        assert!(records.iter().all(|r| r.source_name == "CGTN China"));
    }

    #[test]
    fn test_section_without_items_is_empty() {
        let page = RawPage::html(
            "https://www.cgtn.com/china",
            r#"<html><body><div class="cg-header"></div><div class="cg-main"></div></body></html>"#,
        );
        assert_eq!(Extractor::Cgtn.extract(&page, &source()), Ok(vec![]));
    }

    #[test]
    fn test_error_page_is_parse_error() {
        let page = RawPage::html(
            "https://www.cgtn.com/china",
            "<html><body><h1>403 Forbidden</h1></body></html>",
        );
        assert_eq!(
            Extractor::Cgtn.extract(&page, &source()),
            Err(ParseError::MissingLandmark {
                selector: ".cg-header, #header"
            })
        );
    }
}
