//! Static hosting of the built site.

use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

/// Serve `site_dir`, answering unknown paths with `index.html`.
///
/// Client-side routes such as `/admin` or `/thank-you` therefore load the
/// app on a full page request.
pub fn site_service(site_dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(site_dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(site_dir.join("index.html")))
}
