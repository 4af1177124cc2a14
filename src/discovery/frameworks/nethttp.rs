//! Standard library `net/http`: `HandleFunc`/`Handle` on the package or a
//! mux, no groups. Go 1.22 method patterns (`"POST /items"`) narrow the
//! verb set; otherwise a registration serves every verb.

use crate::discovery::grammar::{FrameworkGrammar, GroupShape, HandlerPosition};
use crate::models::Framework;

pub static NET_HTTP: FrameworkGrammar = FrameworkGrammar {
    framework: Framework::NetHttp,
    import_path: "net/http",
    import_prefix: None,
    verbs: None,
    method_argument: None,
    all_verbs: &["HandleFunc", "Handle"],
    bare_calls: true,
    method_patterns: true,
    group_methods: &[],
    group_shape: GroupShape::Ungrouped,
    handler_position: HandlerPosition::Second,
    use_methods: &[],
    inline_middleware_methods: &[],
    unwrap_handler: true,
};
