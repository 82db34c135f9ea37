//! End-to-end coverage of the full pipeline: discovery is bypassed by
//! feeding `(path, source)` pairs straight to the orchestrator, the way
//! an embedding caller would.

use pygraphscope::config::{Config, SymbolLevel};
use pygraphscope::model::{EdgeKind, NodeKind};
use pygraphscope::orchestrator::Orchestrator;
use std::path::PathBuf;

fn analyze(files: &[(&str, &str)]) -> pygraphscope::artifact::Artifact {
    analyze_with_config(files, &Config::default())
}

fn analyze_with_config(files: &[(&str, &str)], config: &Config) -> pygraphscope::artifact::Artifact {
    let sources = files
        .iter()
        .map(|(path, src)| (PathBuf::from(path), (*src).to_string()))
        .collect();
    Orchestrator::new(config).analyze(sources)
}

#[test]
fn relative_import_resolves_to_a_sibling_module() {
    // S1: `pkg.b` does `from . import a`, which must resolve to `pkg.a`.
    let artifact = analyze(&[
        ("src/pkg/__init__.py", ""),
        ("src/pkg/a.py", "def helper():\n    pass\n"),
        ("src/pkg/b.py", "from . import a\n"),
    ]);
    assert!(artifact.edges.iter().any(|e| e.from == "pkg.b"
        && e.to == "pkg.a"
        && e.edge_type == EdgeKind::Imports));
}

#[test]
fn unresolved_import_folds_into_one_external_package_node() {
    // S2: `import requests`, a package never seen among the analyzed
    // files, folds into a single external node with an `external` edge.
    let artifact = analyze(&[(
        "src/pkg/client.py",
        "import requests\n\nrequests.get(\"http://x\")\n",
    )]);

    let external = artifact
        .nodes
        .iter()
        .find(|n| n.kind == NodeKind::External);
    assert!(external.is_some(), "expected a folded external node");
    let external_id = external.unwrap().id.clone();
    assert_eq!(external_id, "requests");

    assert!(artifact.edges.iter().any(
        |e| e.from == "pkg.client" && e.to == external_id && e.edge_type == EdgeKind::External
    ));
}

#[test]
fn bare_name_call_on_an_imported_module_promotes_to_a_calls_edge() {
    // S2 (promotion half): calling the bound name of a whole-module
    // import directly, `import pkg.a as a; a()`, upgrades the plain
    // `imports` edge with an additional `calls` edge to the same target.
    let artifact = analyze(&[
        ("src/pkg/a.py", "def helper():\n    pass\n"),
        ("src/pkg/b.py", "import pkg.a as a\n\na()\n"),
    ]);

    assert!(artifact.edges.iter().any(|e| e.from == "pkg.b"
        && e.to == "pkg.a"
        && e.edge_type == EdgeKind::Imports));
    assert!(artifact.edges.iter().any(|e| e.from == "pkg.b"
        && e.to == "pkg.a"
        && e.edge_type == EdgeKind::Calls));
}

#[test]
fn attribute_call_on_an_external_import_promotes_to_a_calls_edge() {
    // S2, literal: `import numpy as np; np.array([])` — the call target is
    // `np.array`, whose *receiver* `np` matches the import's bound name,
    // so the external edge is promoted to a calls edge too.
    let artifact = analyze(&[("m.py", "import numpy as np\nnp.array([])\n")]);

    assert!(artifact.edges.iter().any(
        |e| e.from == "m" && e.to == "numpy" && e.edge_type == EdgeKind::External
    ));
    assert!(artifact.edges.iter().any(
        |e| e.from == "m" && e.to == "numpy" && e.edge_type == EdgeKind::Calls
    ));
}

#[test]
fn symbol_level_config_emits_class_and_function_nodes_with_defines_edges() {
    let mut config = Config::default();
    config.symbol_level = SymbolLevel::Symbol;
    let artifact = analyze_with_config(
        &[(
            "src/pkg/mod.py",
            "class Widget:\n    pass\n\ndef build():\n    pass\n",
        )],
        &config,
    );

    let class_node = artifact
        .nodes
        .iter()
        .find(|n| n.id == "pkg.mod.Widget")
        .expect("expected a class node");
    assert_eq!(class_node.kind, NodeKind::Class);
    assert_eq!(class_node.parent.as_deref(), Some("pkg.mod"));

    let function_node = artifact
        .nodes
        .iter()
        .find(|n| n.id == "pkg.mod.build")
        .expect("expected a function node");
    assert_eq!(function_node.kind, NodeKind::Function);
    assert_eq!(function_node.parent.as_deref(), Some("pkg.mod"));

    assert!(artifact.edges.iter().any(|e| e.from == "pkg.mod"
        && e.to == "pkg.mod.Widget"
        && e.edge_type == EdgeKind::Defines));
    assert!(artifact.edges.iter().any(|e| e.from == "pkg.mod"
        && e.to == "pkg.mod.build"
        && e.edge_type == EdgeKind::Defines));

    let module_depth = artifact.layout_depth["pkg.mod"];
    assert_eq!(artifact.layout_depth["pkg.mod.Widget"], module_depth);
    assert_eq!(artifact.layout_depth["pkg.mod.build"], module_depth);

    let module_node = artifact.nodes.iter().find(|n| n.id == "pkg.mod").unwrap();
    assert_eq!(class_node.x, module_node.x);
    assert_eq!(class_node.y, module_node.y);
}

#[test]
fn uncalled_non_entry_function_is_reported_dead() {
    // S3: `unused` is never called and has no decorator, so it is dead;
    // `used` is called from `main`, so it is not.
    let artifact = analyze(&[(
        "src/pkg/mod.py",
        "def unused():\n    pass\n\ndef used():\n    pass\n\ndef main():\n    used()\n",
    )]);
    let details = &artifact.module_details["pkg.mod"];
    assert!(details.dead_functions.contains(&"unused".to_string()));
    assert!(!details.dead_functions.contains(&"used".to_string()));
}

#[test]
fn route_decorator_marks_its_function_as_an_entry_point() {
    // S4.
    let artifact = analyze(&[(
        "src/pkg/routes.py",
        "@app.get(\"/x\")\ndef handler():\n    pass\n",
    )]);
    let details = &artifact.module_details["pkg.routes"];
    assert!(details.entry_points.contains(&"handler".to_string()));
    let handler = details.functions.iter().find(|f| f.name == "handler").unwrap();
    assert!(handler.is_entry_point);
}

#[test]
fn main_guard_is_recorded_as_a_synthetic_entry_point() {
    let artifact = analyze(&[(
        "src/pkg/runner.py",
        "def run():\n    pass\n\nif __name__ == \"__main__\":\n    run()\n",
    )]);
    let details = &artifact.module_details["pkg.runner"];
    assert!(details.entry_points.contains(&"__main__".to_string()));
}

#[test]
fn a_three_cycle_condenses_to_one_layout_depth() {
    // S5: a -> b -> c -> a is a single strongly connected component, so
    // every node in it shares one depth and the graph has no deeper tier.
    let artifact = analyze(&[
        ("src/pkg/a.py", "from . import b\n"),
        ("src/pkg/b.py", "from . import c\n"),
        ("src/pkg/c.py", "from . import a\n"),
    ]);
    assert!(artifact.layout_depth.values().all(|&d| d == 0));
}

#[test]
fn unparseable_source_still_produces_a_module_with_no_symbols() {
    // S6: a syntax error must not abort the run; the module survives
    // with empty symbols/imports rather than disappearing from the graph.
    let artifact = analyze(&[("src/pkg/broken.py", "def (((\n")]);
    let details = &artifact.module_details["pkg.broken"];
    assert!(details.functions.is_empty());
    assert!(details.imports.is_empty());
}

#[test]
fn rerunning_the_same_input_produces_byte_identical_graph_ordering() {
    let files = [
        ("src/pkg/z.py", "import os\n"),
        ("src/pkg/a.py", "from . import z\n"),
    ];
    let first = analyze(&files);
    let second = analyze(&files);
    let ids_of = |a: &pygraphscope::artifact::Artifact| {
        a.nodes.iter().map(|n| n.id.clone()).collect::<Vec<_>>()
    };
    assert_eq!(ids_of(&first), ids_of(&second));
    assert_eq!(first.edges.len(), second.edges.len());
}

#[test]
fn no_self_edges_are_ever_emitted() {
    let artifact = analyze(&[("src/pkg/self_ref.py", "import pkg.self_ref\n")]);
    assert!(!artifact.edges.iter().any(|e| e.from == e.to));
}

#[test]
fn folder_structure_and_file_contents_pass_through_unchanged() {
    let sources = vec![(PathBuf::from("src/pkg/a.py"), "pass\n".to_string())];
    let folder_structure = serde_json::json!({"src": {"pkg": ["a.py"]}});
    let file_contents = serde_json::json!({"src/pkg/a.py": "pass\n"});
    let artifact = Orchestrator::new(&Config::default()).analyze_with_passthrough(
        sources,
        folder_structure.clone(),
        file_contents.clone(),
    );
    assert_eq!(artifact.folder_structure, folder_structure);
    assert_eq!(artifact.file_contents, file_contents);
}

#[test]
fn a_project_metadata_tag_sets_both_title_and_role() {
    let artifact = analyze(&[(
        "src/pkg/settings.py",
        "\"\"\"@project [name: Storefront]\"\"\"\n",
    )]);
    let node = artifact
        .nodes
        .iter()
        .find(|n| n.id == "pkg.settings")
        .unwrap();
    assert_eq!(node.node_type, "data");
    assert_eq!(node.title, "Storefront");
    assert_eq!(node.role, "Storefront");
}

#[test]
fn an_untagged_module_falls_back_to_its_docstring_as_role() {
    let artifact = analyze(&[("src/pkg/util.py", "\"\"\"Shared helpers.\"\"\"\n")]);
    let node = artifact
        .nodes
        .iter()
        .find(|n| n.id == "pkg.util")
        .unwrap();
    assert_eq!(node.node_type, "data");
    assert_eq!(node.role, "Shared helpers.");
}
