//! Echo: `e.GET(path, handler, mw...)`, groups as in Gin.

use phf::phf_map;

use crate::discovery::grammar::{FrameworkGrammar, GroupShape, HandlerPosition, MethodArgument};
use crate::models::{Framework, HttpMethod};

static VERBS: phf::Map<&'static str, HttpMethod> = phf_map! {
    "GET" => HttpMethod::Get,
    "POST" => HttpMethod::Post,
    "PUT" => HttpMethod::Put,
    "DELETE" => HttpMethod::Delete,
    "PATCH" => HttpMethod::Patch,
    "HEAD" => HttpMethod::Head,
    "OPTIONS" => HttpMethod::Options,
};

pub static ECHO: FrameworkGrammar = FrameworkGrammar {
    framework: Framework::Echo,
    import_path: "github.com/labstack/echo/v4",
    import_prefix: Some("github.com/labstack/echo"),
    verbs: Some(&VERBS),
    method_argument: Some(MethodArgument {
        names: &["Add"],
        min_args: 3,
    }),
    all_verbs: &["Any"],
    bare_calls: false,
    method_patterns: false,
    group_methods: &["Group"],
    group_shape: GroupShape::Assigned,
    handler_position: HandlerPosition::Second,
    use_methods: &["Use"],
    inline_middleware_methods: &[],
    unwrap_handler: false,
};
