//! End-to-end registration and rendering.

use turbo_resources::{
    AssetManifest, Attributes, DependencySpec, LiteralResource, ResourceKind, ResourceRegistry,
    ServeConfig,
};

fn framework_registry() -> ResourceRegistry {
    let mut registry = ResourceRegistry::with_external(
        &[LiteralResource::from("https://cdn.example.com/analytics.js")],
        &[LiteralResource::from("https://cdn.example.com/theme.css")],
    );
    registry.add_package_version("dash_renderer", "1.4.0");
    registry.add_package_version("dash_core_components", "2.0.0");

    registry
        .register(
            DependencySpec::new()
                .with_namespace("dash_renderer")
                .with_relative_package_path(vec!["react.min.js", "renderer.min.js"])
                .with_external_url(vec![
                    "https://unpkg.com/react.min.js",
                    "https://unpkg.com/renderer.min.js",
                ]),
            ResourceKind::Script,
        )
        .unwrap();
    registry
        .register(
            DependencySpec::new()
                .with_namespace("dash_core_components")
                .with_relative_package_path(vec!["dcc.min.js", "plotly.min.js"])
                .with_dynamic(vec![false, true]),
            ResourceKind::Script,
        )
        .unwrap();
    registry
        .register(
            DependencySpec::new()
                .with_namespace("dash_core_components")
                .with_relative_package_path("dcc.css")
                .with_external_url("https://unpkg.com/dcc.css"),
            ResourceKind::Stylesheet,
        )
        .unwrap();
    registry
        .register(
            DependencySpec::new()
                .with_namespace("dash_core_components")
                .with_relative_package_path("lazy.css")
                .with_dynamic(true),
            ResourceKind::Stylesheet,
        )
        .unwrap();
    registry
}

#[test]
fn column_form_produces_one_resource_per_row() {
    let registry = framework_registry();
    assert_eq!(registry.len(), 8);
    assert_eq!(
        registry.paths("dash_renderer"),
        vec![
            Some("react.min.js".to_string()),
            Some("renderer.min.js".to_string())
        ]
    );
    let namespaces: Vec<String> = registry.namespaces().into_iter().collect();
    assert_eq!(namespaces, ["dash_core_components", "dash_renderer"]);
}

#[test]
fn links_served_externally() {
    let registry = framework_registry();
    assert_eq!(
        registry.render_links(),
        [
            r#"<link rel="stylesheet" href="https://cdn.example.com/theme.css">"#,
            r#"<link rel="stylesheet" href="https://unpkg.com/dcc.css">"#,
        ]
        .join("\n")
    );
}

#[test]
fn links_served_locally() {
    let mut registry = framework_registry();
    registry.set_serve_css_locally(true);
    assert_eq!(
        registry.render_links(),
        [
            r#"<link rel="stylesheet" href="https://cdn.example.com/theme.css">"#,
            r#"<link rel="stylesheet" href="dcc.css">"#,
        ]
        .join("\n")
    );
}

#[test]
fn scripts_served_locally_skip_dynamic() {
    let mut registry = framework_registry();
    registry.set_config(ServeConfig::local().with_cache_bust("7"));

    let rendered = registry.render_scripts().unwrap();
    assert_eq!(
        rendered,
        [
            r#"<script src="https://cdn.example.com/analytics.js"></script>"#,
            r#"<script src="_dash-component-suites/dash_renderer/react.min.js?v=1.4.0&m=7"></script>"#,
            r#"<script src="_dash-component-suites/dash_renderer/renderer.min.js?v=1.4.0&m=7"></script>"#,
            r#"<script src="_dash-component-suites/dash_core_components/dcc.min.js?v=2.0.0&m=7"></script>"#,
        ]
        .join("\n")
    );
    assert!(!rendered.contains("plotly"));
}

#[test]
fn dynamic_resources_never_render() {
    let mut registry = framework_registry();
    for (scripts, css, dev) in [
        (false, false, false),
        (true, true, false),
        (true, true, true),
    ] {
        registry.set_serve_scripts_locally(scripts);
        registry.set_serve_css_locally(css);
        registry.set_serve_dev_bundles(dev);
        assert!(!registry.render_scripts().unwrap().contains("plotly"));
        assert!(!registry.render_links().contains("lazy.css"));
    }
}

#[test]
fn rendering_does_not_mutate() {
    let mut registry = framework_registry();
    registry.set_config(ServeConfig::local());
    let before = registry.resources().to_vec();
    let first = registry.render_scripts().unwrap();
    let second = registry.render_scripts().unwrap();
    assert_eq!(first, second);
    assert_eq!(registry.resources(), before.as_slice());
}

#[test]
fn attribute_literals_copied_verbatim() {
    let mut attributes = Attributes::new();
    attributes.insert("src".to_string(), "https://x/a.js".to_string());
    attributes.insert("integrity".to_string(), "sha256-abc".to_string());
    attributes.insert("crossorigin".to_string(), "anonymous".to_string());

    let mut registry = ResourceRegistry::new().with_config(ServeConfig::local());
    registry.register(attributes.clone(), ResourceKind::Script).unwrap();

    assert_eq!(registry.resources()[0].attributes(), &attributes);
    assert_eq!(
        registry.render_scripts().unwrap(),
        r#"<script src="https://x/a.js" integrity="sha256-abc" crossorigin="anonymous"></script>"#
    );
}

#[test]
fn manifest_loading_is_atomic() {
    let manifest: AssetManifest = serde_json::from_str(
        r#"{
            "external_scripts": ["https://x/a.js"],
            "resources": [
                {"kind": "js", "namespace": "lib", "relative_package_path": "lib.js"},
                {"kind": "font", "form": "raw", "url": "https://x/font.woff"}
            ]
        }"#,
    )
    .unwrap();

    let mut registry = ResourceRegistry::new();
    assert!(registry.load_manifest(&manifest).is_err());
    assert!(registry.is_empty());
}

#[test]
fn manifest_loading_installs_versions() {
    let manifest: AssetManifest = toml::from_str(
        r#"
        [[resources]]
        kind = "js"
        namespace = "lib"
        relative_package_path = "lib.min.js"

        [packages]
        lib = "3.1.4"
        "#,
    )
    .unwrap();

    let mut registry = ResourceRegistry::new().with_config(ServeConfig::local());
    assert_eq!(registry.load_manifest(&manifest).unwrap(), 1);
    assert_eq!(
        registry.render_scripts().unwrap(),
        r#"<script src="_dash-component-suites/lib/lib.min.js?v=3.1.4&m=1"></script>"#
    );
}

fn dev_bundle_registry() -> ResourceRegistry {
    let mut registry = ResourceRegistry::new();
    registry.add_package_version("widgets", "0.9.0");
    registry
        .register(
            DependencySpec::new()
                .with_namespace("widgets")
                .with_relative_package_path(vec!["widgets.css", "print.css"])
                .with_dev_package_path(vec!["widgets.dev.css", "print.dev.css"])
                .with_external_url(vec![
                    "https://unpkg.com/widgets.css",
                    "https://unpkg.com/print.css",
                ]),
            ResourceKind::Stylesheet,
        )
        .unwrap();
    registry
        .register(
            DependencySpec::new()
                .with_namespace("widgets")
                .with_relative_package_path("widgets.min.js")
                .with_dev_package_path("widgets.dev.js"),
            ResourceKind::Script,
        )
        .unwrap();
    registry
        .register(
            DependencySpec::new()
                .with_namespace("widgets")
                .with_dev_package_path("debug-only.js"),
            ResourceKind::Script,
        )
        .unwrap();
    registry
}

#[test]
fn local_links_serve_dev_bundles() {
    let mut registry = dev_bundle_registry();
    registry.set_config(ServeConfig::local().with_dev_bundles(true));

    assert_eq!(
        registry.render_links(),
        [
            r#"<link rel="stylesheet" href="widgets.dev.css">"#,
            r#"<link rel="stylesheet" href="print.dev.css">"#,
        ]
        .join("\n")
    );

    registry.set_serve_css_locally(false);
    assert_eq!(
        registry.render_links(),
        [
            r#"<link rel="stylesheet" href="https://unpkg.com/widgets.css">"#,
            r#"<link rel="stylesheet" href="https://unpkg.com/print.css">"#,
        ]
        .join("\n")
    );
}

#[test]
fn local_links_fall_back_to_relative_path_without_dev_path() {
    let mut registry = ResourceRegistry::new().with_config(ServeConfig::local().with_dev_bundles(true));
    registry
        .register(
            DependencySpec::new()
                .with_namespace("widgets")
                .with_relative_package_path("widgets.css")
                .with_dev_package_path("widgets.dev.css"),
            ResourceKind::Stylesheet,
        )
        .unwrap();
    registry
        .register(
            DependencySpec::new()
                .with_namespace("widgets")
                .with_relative_package_path("theme.css"),
            ResourceKind::Stylesheet,
        )
        .unwrap();

    assert_eq!(
        registry.render_links(),
        [
            r#"<link rel="stylesheet" href="widgets.dev.css">"#,
            r#"<link rel="stylesheet" href="theme.css">"#,
        ]
        .join("\n")
    );

    registry.set_serve_dev_bundles(false);
    assert_eq!(
        registry.render_links(),
        [
            r#"<link rel="stylesheet" href="widgets.css">"#,
            r#"<link rel="stylesheet" href="theme.css">"#,
        ]
        .join("\n")
    );
}

#[test]
fn dev_path_alone_never_gets_a_suite_url() {
    let mut registry = dev_bundle_registry();
    registry.set_config(ServeConfig::local().with_dev_bundles(true));

    assert_eq!(
        registry.render_scripts().unwrap(),
        r#"<script src="_dash-component-suites/widgets/widgets.dev.js?v=0.9.0&m=1"></script>"#
    );
    assert_eq!(
        registry.paths("widgets"),
        vec![Some("widgets.min.js".to_string()), None]
    );
}
