//! Chi: `r.Get(path, handler)`, closure-scoped `r.Route`/`r.Group`
//! subrouters and inline `r.With(mw...)` chains.

use phf::phf_map;

use crate::discovery::grammar::{FrameworkGrammar, GroupShape, HandlerPosition, MethodArgument};
use crate::models::{Framework, HttpMethod};

static VERBS: phf::Map<&'static str, HttpMethod> = phf_map! {
    "Get" => HttpMethod::Get,
    "Post" => HttpMethod::Post,
    "Put" => HttpMethod::Put,
    "Delete" => HttpMethod::Delete,
    "Patch" => HttpMethod::Patch,
    "Head" => HttpMethod::Head,
    "Options" => HttpMethod::Options,
};

pub static CHI: FrameworkGrammar = FrameworkGrammar {
    framework: Framework::Chi,
    import_path: "github.com/go-chi/chi/v5",
    import_prefix: Some("github.com/go-chi/chi"),
    verbs: Some(&VERBS),
    method_argument: Some(MethodArgument {
        names: &["Method", "MethodFunc"],
        min_args: 2,
    }),
    all_verbs: &[],
    bare_calls: false,
    method_patterns: false,
    group_methods: &["Route", "Group"],
    group_shape: GroupShape::ClosureParameter,
    handler_position: HandlerPosition::Second,
    use_methods: &["Use"],
    inline_middleware_methods: &["With"],
    unwrap_handler: false,
};
