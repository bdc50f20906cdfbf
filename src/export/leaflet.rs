//! Leaflet bootstrap emitter.
//!
//! Turns a configured [`ViewHandle`] into the script a browser page runs to
//! create the same view with Leaflet: one `L.map(..).setView(..)` call and
//! one `L.tileLayer(..).addTo(map)` per layer, in paint order. Options left
//! unset on a layer are not written, so Leaflet applies its own defaults.

use crate::{
    core::{
        config::{validate_container_id, BootstrapConfig},
        constants::{DEFAULT_CONTAINER_ID, LEAFLET_VERSION},
        view::ViewHandle,
    },
    layers::tile::TileLayerSpec,
    Result,
};

const LEAFLET_CSS_INTEGRITY: &str = "sha256-p4NxAoJBhIIN+hmNHrzRCf9tD/miZyoHS5obTRR9BMY=";
const LEAFLET_JS_INTEGRITY: &str = "sha256-20nQCchB9co0qIjJZRGuk2/Z9VM+kNiyxNV1lvTlZBo=";

/// JavaScript that recreates a view with Leaflet.
#[derive(Debug, Clone, Copy)]
pub struct LeafletScript<'a> {
    view: &'a ViewHandle,
    container: &'a str,
}

impl<'a> LeafletScript<'a> {
    pub fn new(view: &'a ViewHandle) -> Self {
        Self {
            view,
            container: DEFAULT_CONTAINER_ID,
        }
    }

    /// DOM element id passed to `L.map`; must match `[A-Za-z][A-Za-z0-9_-]*`.
    pub fn container(mut self, container: &'a str) -> Result<Self> {
        validate_container_id(container)?;
        self.container = container;
        Ok(self)
    }

    pub fn render(&self) -> Result<String> {
        let mut script = String::new();
        let center = self.view.center();

        script.push_str(&format!(
            "var map = L.map({}).setView([{}, {}], {});\n",
            serde_json::to_string(self.container)?,
            center.lat,
            center.lng,
            self.view.zoom()
        ));

        for layer in self.view.layers() {
            script.push('\n');
            script.push_str(&tile_layer_call(&layer.spec)?);
        }
        Ok(script)
    }
}

/// One `L.tileLayer(url, {..}).addTo(map);` statement; unset options are left out.
fn tile_layer_call(spec: &TileLayerSpec) -> Result<String> {
    let url = serde_json::to_string(spec.url_template().as_str())?;

    let mut options: Vec<(&str, String)> = Vec::new();
    if let Some(attribution) = spec.attribution() {
        options.push(("attribution", serde_json::to_string(attribution)?));
    }
    if let Some(subdomains) = spec.subdomains() {
        options.push(("subdomains", serde_json::to_string(subdomains)?));
    }
    if let Some(max_zoom) = spec.max_zoom() {
        options.push(("maxZoom", max_zoom.to_string()));
    }
    if let Some(opacity) = spec.opacity() {
        options.push(("opacity", serde_json::to_string(&opacity)?));
    }

    if options.is_empty() {
        return Ok(format!("L.tileLayer({}).addTo(map);\n", url));
    }
    let body = options
        .iter()
        .map(|(key, value)| format!("    {}: {}", key, value))
        .collect::<Vec<_>>()
        .join(",\n");
    Ok(format!("L.tileLayer({}, {{\n{}\n}}).addTo(map);\n", url, body))
}

/// A standalone HTML page that loads Leaflet and runs the bootstrap script.
#[derive(Debug, Clone)]
pub struct LeafletPage<'a> {
    script: LeafletScript<'a>,
    title: String,
}

impl<'a> LeafletPage<'a> {
    pub fn new(script: LeafletScript<'a>) -> Self {
        Self {
            script,
            title: "Map".to_string(),
        }
    }

    /// Page for a bootstrapped config, mounted into its configured container.
    pub fn for_config(view: &'a ViewHandle, config: &'a BootstrapConfig) -> Result<Self> {
        Ok(Self::new(LeafletScript::new(view).container(&config.container)?))
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn render(&self) -> Result<String> {
        // "</" would end the inline <script> element early
        let script = self.script.render()?.replace("</", "<\\/");
        let container = self.script.container;

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{title}</title>
  <link
    rel="stylesheet"
    href="https://unpkg.com/leaflet@{version}/dist/leaflet.css"
    integrity="{css_integrity}"
    crossorigin=""
  />
  <style>
    html, body {{ height: 100%; margin: 0; padding: 0; }}
    #{container} {{ height: 100%; width: 100%; }}
  </style>
</head>
<body>
  <div id="{container}"></div>
  <script
    src="https://unpkg.com/leaflet@{version}/dist/leaflet.js"
    integrity="{js_integrity}"
    crossorigin=""
  ></script>
  <script>
{script}  </script>
</body>
</html>
"#,
            title = escape_html(&self.title),
            version = LEAFLET_VERSION,
            css_integrity = LEAFLET_CSS_INTEGRITY,
            js_integrity = LEAFLET_JS_INTEGRITY,
            container = container,
            script = script,
        ))
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
