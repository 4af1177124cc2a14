//! Gin: `r.GET(path, mw..., handler)`, `v1 := r.Group("/v1", mw...)`.

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

pub static GIN: FrameworkGrammar = FrameworkGrammar {
    framework: Framework::Gin,
    import_path: "github.com/gin-gonic/gin",
    import_prefix: Some("github.com/gin-gonic/gin"),
    verbs: Some(&VERBS),
    method_argument: Some(MethodArgument {
        names: &["Handle"],
        min_args: 2,
    }),
    all_verbs: &["Any"],
    bare_calls: false,
    method_patterns: false,
    group_methods: &["Group"],
    group_shape: GroupShape::Assigned,
    handler_position: HandlerPosition::Last,
    use_methods: &["Use"],
    inline_middleware_methods: &[],
    unwrap_handler: false,
};
