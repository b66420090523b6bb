use std::sync::Arc;

use super::FontFace;

/// Id of the element the remote engine mounts into.
pub const CONTAINER_ID: &str = "container_id";

/// Everything loaded into a fresh rendering surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapDocument {
    engine_source: Arc<str>,
    dispatch_script: String,
    font_faces: Vec<FontFace>,
}

impl BootstrapDocument {
    #[must_use]
    pub fn new(engine_source: Arc<str>, dispatch_script: String, font_faces: Vec<FontFace>) -> Self {
        Self {
            engine_source,
            dispatch_script,
            font_faces,
        }
    }

    #[must_use]
    pub fn engine_source(&self) -> &str {
        &self.engine_source
    }

    #[must_use]
    pub fn dispatch_script(&self) -> &str {
        &self.dispatch_script
    }

    #[must_use]
    pub fn font_faces(&self) -> &[FontFace] {
        &self.font_faces
    }

    #[must_use]
    pub fn font_face_declarations(&self) -> Vec<String> {
        self.font_faces.iter().map(FontFace::declaration).collect()
    }

    /// The readiness gate only exists when custom fonts are embedded.
    #[must_use]
    pub fn has_font_gate(&self) -> bool {
        !self.font_faces.is_empty()
    }

    /// Renders the full HTML page. Output is a pure function of the document.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(
            self.engine_source.len() + self.dispatch_script.len() + 2048,
        );

        html.push_str(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"utf-8\" />\n    \
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1, \
             maximum-scale=1, user-scalable=no\">\n    <title></title>\n",
        );
        html.push_str("    <script type=\"text/javascript\">");
        html.push_str(&escape_script_text(&self.engine_source));
        html.push_str("</script>\n");
        html.push_str("</head>\n<body class=\"App\">\n");
        html.push_str(&format!(
            "    <div id=\"{CONTAINER_ID}\" style=\"width:100vw;height:100vh\"></div>\n"
        ));
        html.push_str("</body>\n<script>\n");
        html.push_str(HOST_CHANNEL_SCRIPT);
        html.push_str("\n    var receiveMessage = function (message) {\n");
        html.push_str("        var data = JSON.parse(message);\n");
        html.push_str("        var functionName = data.function;\n");
        html.push_str("        var params = data.params || {};\n");
        html.push_str(&self.dispatch_script);
        html.push_str("\n    };\n");
        if self.has_font_gate() {
            html.push_str(FONT_GATE_SCRIPT);
        }
        html.push_str("</script>\n<style>\n");
        for declaration in self.font_face_declarations() {
            html.push_str(&declaration);
            html.push('\n');
        }
        html.push_str(RESET_STYLE);
        html.push_str("</style>\n</html>\n");
        html
    }
}

// A `</script` in any letter case inside the bundle would close the tag early.
fn escape_script_text(source: &str) -> String {
    const CLOSE_TAG: &[u8] = b"</script";
    let mut escaped = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(position) = rest.find("</") {
        let (head, tail) = rest.split_at(position);
        escaped.push_str(head);
        let closes_script = tail
            .as_bytes()
            .get(..CLOSE_TAG.len())
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(CLOSE_TAG));
        escaped.push_str(if closes_script { "<\\/" } else { "</" });
        rest = &tail[2..];
    }
    escaped.push_str(rest);
    escaped
}

const HOST_CHANNEL_SCRIPT: &str = r#"    var kchart = null;

    var postToHost = function (message) {
        if (window.ipc && window.ipc.postMessage) {
            window.ipc.postMessage(message);
        } else if (window.ReactNativeWebView) {
            window.ReactNativeWebView.postMessage(message);
        } else if (window.chrome && window.chrome.webview) {
            window.chrome.webview.postMessage(message);
        } else if (window.parent && window.parent !== window) {
            window.parent.postMessage(message, '*');
        }
    };

    window.onload = function () {
        document.addEventListener('message', function (event) {
            receiveMessage(event.data);
        });
        window.addEventListener('message', function (event) {
            receiveMessage(event.data);
        });
    };
"#;

const FONT_GATE_SCRIPT: &str = r#"
    document.fonts.ready.then(function () {
        var container = document.getElementById('container_id');
        container.style.opacity = 0;
        var fontGateInterval = setInterval(function () {
            if (kchart) {
                clearInterval(fontGateInterval);
                container.style.opacity = 1;
                kchart.resize();
            }
        }, 100);
    });
"#;

const RESET_STYLE: &str = r#"    #container_id {
        height: 100vh;
        width: 100vw;
    }

    html,
    body {
        padding: 0 !important;
        margin: 0 !important;
    }
"#;
