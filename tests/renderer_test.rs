use stencil::config::ProjectConfig;
use stencil::renderer::{render_readme, MiniJinjaRenderer, TemplateRenderer};

#[test]
fn test_minijinja_renderer() {
    let engine = MiniJinjaRenderer::new();
    let context = serde_json::json!({
        "name": "test",
        "value": 42
    });

    let result = engine.render("Hello {{ name }}!", &context).unwrap();
    assert_eq!(result, "Hello test!");

    let result = engine.render("Value: {{ value }}", &context).unwrap();
    assert_eq!(result, "Value: 42");
}

#[test]
fn test_invalid_template_is_an_error() {
    let engine = MiniJinjaRenderer::new();
    let context = serde_json::json!({});

    assert!(engine.render("{% if unclosed", &context).is_err());
}

#[test]
fn test_render_readme_substitutes_project_fields() {
    let engine = MiniJinjaRenderer::new();
    let config = ProjectConfig::new(
        "demo-app",
        "Does demo things",
        "Jane Doe",
        "jane@example.com",
        Some("janedoe".to_string()),
    )
    .unwrap();

    let readme = render_readme(&engine, &config).unwrap();

    assert!(readme.starts_with("# demo-app\n"));
    assert!(readme.contains("Does demo things"));
    assert!(readme.contains("git clone https://github.com/janedoe/demo-app.git"));
    assert!(readme.contains("cd demo-app"));
    assert!(readme.contains("src/demo_app/"));
    assert!(readme.contains("Jane Doe - jane@example.com"));

    // No unrendered placeholders survive.
    assert!(!readme.contains("{{"));
}
