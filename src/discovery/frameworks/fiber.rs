//! Fiber: `app.Get(path, mw..., handler)`, `api := app.Group("/api", mw...)`.

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

pub static FIBER: FrameworkGrammar = FrameworkGrammar {
    framework: Framework::Fiber,
    import_path: "github.com/gofiber/fiber/v2",
    import_prefix: Some("github.com/gofiber/fiber"),
    verbs: Some(&VERBS),
    method_argument: Some(MethodArgument {
        names: &["Add"],
        min_args: 3,
    }),
    all_verbs: &["All"],
    bare_calls: false,
    method_patterns: false,
    group_methods: &["Group"],
    group_shape: GroupShape::Assigned,
    handler_position: HandlerPosition::Last,
    use_methods: &["Use"],
    inline_middleware_methods: &[],
    unwrap_handler: false,
};

#[cfg(test)]
mod tests {
    use crate::discovery::testing::discover;
    use crate::models::HttpMethod;

    #[test]
    fn test_fiber_routes_and_context_getters() {
        let endpoints = discover(
            &super::FIBER,
            r#"
package main

import "github.com/gofiber/fiber/v2"

func main() {
    app := fiber.New()
    app.Get("/status", func(c *fiber.Ctx) error {
        token := c.Get("Authorization")
        lang := c.Get("Accept-Language", "en")
        return c.SendString(token + lang)
    })

    api := app.Group("/api", jwtware.New(cfg))
    api.Post("/upload", RequirePermission("files:write"), upload)
    app.All("/proxy", proxyHandler)
}
"#,
        );

        assert_eq!(endpoints.len(), 3);
        assert_eq!(endpoints[0].handler_name, "<anonymous>");
        assert_eq!(endpoints[0].route, "/status");

        let upload = &endpoints[1];
        assert_eq!(upload.full_route(), "/api/upload");
        assert_eq!(upload.handler_name, "upload");
        assert_eq!(upload.authorization.permissions, vec!["files:write"]);
        assert_eq!(
            upload.authorization.auth_dependencies,
            vec!["jwtware.New", "RequirePermission"]
        );

        assert_eq!(endpoints[2].methods.len(), HttpMethod::ALL.len());
    }
}
