//! Global Times homepage layout.
//!
//! The homepage groups stories into `main_section01`, `main_section02`, ...
//! blocks. Headlines are the text links inside those blocks; the lead story
//! sits in `list_info`/`common_area` wrappers together with its byline time
//! (`.source_time`) and teaser image. Image-only links have no text and are
//! skipped.

use super::Layout;
use once_cell::sync::Lazy;

pub(super) static LAYOUT: Lazy<Layout> = Lazy::new(|| {
    Layout::new(
        "#header",
        r#"div[id^="main_section"] a[href]:not(.more)"#,
        &["list_info", "common_area"],
        ".source_time, .pub_time, time",
        "img",
    )
});
