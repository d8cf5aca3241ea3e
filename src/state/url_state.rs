//! Launch parameters.
//!
//! On the web they come from the page query string
//! (`?view=dual&topo=https://...`). Native builds read the same settings
//! from `GLOBE_VIEW`, `GLOBE_GEO_URL` and `GLOBE_TOPO_URL`.

/// GeoJSON dataset used by the single globe when none is given.
pub const DEFAULT_GEO_URL: &str = "https://assets.codepen.io/911796/custom.geo.json";

/// TopoJSON world atlas used by the dual globe when none is given.
pub const DEFAULT_TOPO_URL: &str = "https://cdn.jsdelivr.net/npm/world-atlas@2/countries-110m.json";

/// Top-level view shown in the central panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActiveView {
    #[default]
    SingleGlobe,
    DualGlobe,
    GraphEditor,
}

impl ActiveView {
    pub const ALL: [ActiveView; 3] = [Self::SingleGlobe, Self::DualGlobe, Self::GraphEditor];

    pub fn label(&self) -> &'static str {
        match self {
            Self::SingleGlobe => "Globe",
            Self::DualGlobe => "Connections",
            Self::GraphEditor => "Graph",
        }
    }

    /// Parses a `view` parameter value. Unknown values yield `None`.
    pub fn from_param(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "single" | "globe" => Some(Self::SingleGlobe),
            "dual" | "connections" => Some(Self::DualGlobe),
            "graph" => Some(Self::GraphEditor),
            _ => None,
        }
    }
}

/// Parsed launch parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchParams {
    pub view: ActiveView,
    pub geo_url: String,
    pub topo_url: String,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            view: ActiveView::default(),
            geo_url: DEFAULT_GEO_URL.to_string(),
            topo_url: DEFAULT_TOPO_URL.to_string(),
        }
    }
}

impl LaunchParams {
    fn set(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        match key {
            "view" => match ActiveView::from_param(value) {
                Some(view) => self.view = view,
                None => log::warn!("Unknown view '{}', using default", value),
            },
            "geo" => self.geo_url = value.to_string(),
            "topo" => self.topo_url = value.to_string(),
            _ => {}
        }
    }
}

/// Parses a query string, with or without the leading `?`.
pub fn parse_query(query: &str) -> LaunchParams {
    let mut params = LaunchParams::default();

    let query = query.trim_start_matches('?');
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let mut kv = pair.splitn(2, '=');
        let key = kv.next().unwrap_or("");
        let value = percent_decode(kv.next().unwrap_or(""));
        params.set(key, &value);
    }

    params
}

/// Reads launch parameters from the current page URL.
#[cfg(target_arch = "wasm32")]
pub fn parse_from_url() -> LaunchParams {
    let search = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    parse_query(&search)
}

/// Reads launch parameters from the environment.
#[cfg(not(target_arch = "wasm32"))]
pub fn parse_from_url() -> LaunchParams {
    let mut params = LaunchParams::default();
    for (var, key) in [
        ("GLOBE_VIEW", "view"),
        ("GLOBE_GEO_URL", "geo"),
        ("GLOBE_TOPO_URL", "topo"),
    ] {
        if let Ok(value) = std::env::var(var) {
            params.set(key, &value);
        }
    }
    params
}

/// Decodes `%XX` escapes and `+` as space. Malformed escapes are kept verbatim.
fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                match hex {
                    Some(b) => {
                        out.push(b);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_uses_defaults() {
        assert_eq!(parse_query(""), LaunchParams::default());
        assert_eq!(parse_query("?"), LaunchParams::default());
    }

    #[test]
    fn test_parse_view_and_urls() {
        let params = parse_query("?view=dual&topo=https%3A%2F%2Fexample.com%2Fworld.json");
        assert_eq!(params.view, ActiveView::DualGlobe);
        assert_eq!(params.topo_url, "https://example.com/world.json");
        assert_eq!(params.geo_url, DEFAULT_GEO_URL);
    }

    #[test]
    fn test_unknown_view_ignored() {
        let params = parse_query("view=mercator&geo=data.json");
        assert_eq!(params.view, ActiveView::SingleGlobe);
        assert_eq!(params.geo_url, "data.json");
    }

    #[test]
    fn test_malformed_escape_kept() {
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("a%zzb"), "a%zzb");
        assert_eq!(percent_decode("a+b%20c"), "a b c");
    }
}
