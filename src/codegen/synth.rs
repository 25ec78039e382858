//! Export synthesizer.
//!
//! Turns a registry snapshot into the full text of the generated modules.
//! The pipeline is validate -> build a structured plan -> render, so that
//! escaping lives in one place (`sanitize`) and rendering in one function
//! per output kind. Nothing here touches the filesystem.
//!
//! Entries are emitted in the iteration order of the input maps. The server
//! ordering is preserved end-to-end; we never sort or deduplicate, so an
//! unchanged snapshot renders byte-identical output (modulo the embedded
//! generation timestamp).

use crate::codegen::sanitize::{
    js_string, js_string_array, validate_author_handle, validate_component_name,
};
use crate::error::{BlockforgeError, Result};
use crate::project_identity;
use crate::registry::{Registry, RegistryEntry, RegistrySnapshot};

/// One `export const <name> = …` declaration.
#[derive(Debug, Clone)]
pub struct BindingDecl {
    pub name: String,
}

/// One entry of the generated metadata object.
#[derive(Debug, Clone)]
pub struct MetadataEntry {
    pub name: String,
    pub block_id: String,
    pub title: String,
    pub description: String,
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub last_updated: String,
}

/// Plan for the global exports module.
#[derive(Debug, Clone)]
pub struct GlobalModule {
    pub bindings: Vec<BindingDecl>,
    pub metadata: Vec<MetadataEntry>,
    pub generated_at: String,
}

/// Plan for one author namespace module.
#[derive(Debug, Clone)]
pub struct AuthorModule {
    pub author: String,
    pub bindings: Vec<BindingDecl>,
    pub metadata: Vec<MetadataEntry>,
    pub generated_at: String,
}

/// Rendered file for one author namespace.
#[derive(Debug, Clone)]
pub struct AuthorFile {
    pub author: String,
    pub content: String,
}

/// Everything one sync run writes, fully rendered and ready to materialize.
#[derive(Debug, Clone)]
pub struct SynthesizedOutput {
    pub global: String,
    pub authors: Vec<AuthorFile>,
    pub component_count: usize,
    pub author_count: usize,
}

/// Synthesize the whole output set for a snapshot. Fails fast on the first
/// invalid name or malformed entry; callers must not write anything on error.
pub fn synthesize(snapshot: &RegistrySnapshot, generated_at: &str) -> Result<SynthesizedOutput> {
    let global = plan_global(&snapshot.registry, generated_at)?;

    let mut authors = Vec::with_capacity(snapshot.author_registry.len());
    for (author, registry) in &snapshot.author_registry {
        let module = plan_author(author, registry, generated_at)?;
        authors.push(AuthorFile {
            author: author.clone(),
            content: render_author(&module),
        });
    }

    Ok(SynthesizedOutput {
        component_count: snapshot.registry.len(),
        author_count: authors.len(),
        global: render_global(&global),
        authors,
    })
}

pub fn plan_global(registry: &Registry, generated_at: &str) -> Result<GlobalModule> {
    let mut bindings = Vec::with_capacity(registry.len());
    let mut metadata = Vec::with_capacity(registry.len());

    for (key, entry) in registry {
        check_entry(key, entry, None)?;
        bindings.push(BindingDecl {
            name: entry.component_name.clone(),
        });
        metadata.push(metadata_entry(entry));
    }

    Ok(GlobalModule {
        bindings,
        metadata,
        generated_at: generated_at.to_string(),
    })
}

pub fn plan_author(author: &str, registry: &Registry, generated_at: &str) -> Result<AuthorModule> {
    validate_author_handle(author)?;

    let mut bindings = Vec::with_capacity(registry.len());
    let mut metadata = Vec::with_capacity(registry.len());

    for (key, entry) in registry {
        check_entry(key, entry, Some(author))?;
        bindings.push(BindingDecl {
            name: entry.component_name.clone(),
        });
        metadata.push(metadata_entry(entry));
    }

    Ok(AuthorModule {
        author: author.to_string(),
        bindings,
        metadata,
        generated_at: generated_at.to_string(),
    })
}

fn check_entry(key: &str, entry: &RegistryEntry, author: Option<&str>) -> Result<()> {
    validate_component_name(&entry.component_name, author)?;
    if key != entry.component_name {
        return Err(BlockforgeError::MalformedEntry {
            component: key.to_string(),
            reason: format!(
                "registry key does not match componentName '{}'",
                entry.component_name
            ),
        });
    }
    if entry.block_id.is_empty() {
        return Err(BlockforgeError::MalformedEntry {
            component: key.to_string(),
            reason: "blockId is empty".to_string(),
        });
    }
    Ok(())
}

fn metadata_entry(entry: &RegistryEntry) -> MetadataEntry {
    MetadataEntry {
        name: entry.component_name.clone(),
        block_id: entry.block_id.clone(),
        title: entry.title.clone(),
        description: entry.description.clone(),
        author: entry.author.clone(),
        tags: entry.tags.clone(),
        last_updated: entry.last_updated.clone(),
    }
}

fn header(generated_at: &str) -> String {
    format!(
        "// @generated by {} v{} at {}\n\
         // Do not edit by hand. This file is rewritten on every sync.\n",
        project_identity::BINARY_NAME,
        env!("CARGO_PKG_VERSION"),
        generated_at
    )
}

/// Render the global exports module.
pub fn render_global(module: &GlobalModule) -> String {
    let mut out = header(&module.generated_at);
    out.push_str(&format!(
        "import {{ createBlock }} from {};\n\n",
        js_string(project_identity::RUNTIME_MODULE)
    ));

    for binding in &module.bindings {
        out.push_str(&format!(
            "export const {} = createBlock({});\n",
            binding.name,
            js_string(&binding.name)
        ));
    }

    out.push_str("\nexport const blocks = {\n");
    for binding in &module.bindings {
        out.push_str(&format!("  {},\n", binding.name));
    }
    out.push_str("};\n");

    out.push_str("\nexport const blockMetadata = {\n");
    for entry in &module.metadata {
        out.push_str(&render_metadata_entry(entry, true));
    }
    out.push_str("};\n");

    out
}

/// Render one author namespace module. Same shape as the global module
/// except the factory takes the author, the aggregate is the default
/// export, and per-entry authorship moves to the module level.
pub fn render_author(module: &AuthorModule) -> String {
    let mut out = header(&module.generated_at);
    out.push_str(&format!(
        "import {{ createAuthorBlock }} from {};\n\n",
        js_string(project_identity::RUNTIME_MODULE)
    ));

    for binding in &module.bindings {
        out.push_str(&format!(
            "export const {} = createAuthorBlock({}, {});\n",
            binding.name,
            js_string(&module.author),
            js_string(&binding.name)
        ));
    }

    out.push_str("\nconst blocks = {\n");
    for binding in &module.bindings {
        out.push_str(&format!("  {},\n", binding.name));
    }
    out.push_str("};\n");

    out.push_str("\nexport const blockMetadata = {\n");
    out.push_str(&format!("  author: {},\n", js_string(&module.author)));
    out.push_str(&format!("  totalComponents: {},\n", module.bindings.len()));
    out.push_str("  components: {\n");
    for entry in &module.metadata {
        let rendered = render_metadata_entry(entry, false);
        for line in rendered.lines() {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str("  },\n");
    out.push_str("};\n");

    out.push_str("\nexport default blocks;\n");
    out
}

fn render_metadata_entry(entry: &MetadataEntry, with_author: bool) -> String {
    let mut out = format!("  {}: {{\n", entry.name);
    out.push_str(&format!("    blockId: {},\n", js_string(&entry.block_id)));
    out.push_str(&format!("    title: {},\n", js_string(&entry.title)));
    out.push_str(&format!(
        "    description: {},\n",
        js_string(&entry.description)
    ));
    if with_author {
        let author = match &entry.author {
            Some(author) => js_string(author),
            None => "null".to_string(),
        };
        out.push_str(&format!("    author: {},\n", author));
    }
    out.push_str(&format!("    tags: {},\n", js_string_array(&entry.tags)));
    out.push_str(&format!(
        "    lastUpdated: {},\n",
        js_string(&entry.last_updated)
    ));
    out.push_str("  },\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{AuthorRegistry, Registry, RegistryMeta};

    const TS: &str = "2026-08-01T00:00:00Z";

    fn entry(name: &str, author: Option<&str>) -> RegistryEntry {
        RegistryEntry {
            block_id: format!("{:0>24}", name.len()),
            component_name: name.to_string(),
            author: author.map(str::to_string),
            title: format!("{} title", name),
            description: format!("{} description", name),
            version: None,
            tags: vec!["ui".to_string()],
            last_updated: "2026-07-01T12:00:00Z".to_string(),
        }
    }

    fn registry_of(entries: Vec<RegistryEntry>) -> Registry {
        entries
            .into_iter()
            .map(|e| (e.component_name.clone(), e))
            .collect()
    }

    fn snapshot(global: Vec<RegistryEntry>, authors: Vec<(&str, Vec<RegistryEntry>)>) -> RegistrySnapshot {
        let author_registry: AuthorRegistry = authors
            .into_iter()
            .map(|(author, entries)| (author.to_string(), registry_of(entries)))
            .collect();
        RegistrySnapshot {
            registry: registry_of(global),
            author_registry,
            meta: RegistryMeta::default(),
        }
    }

    #[test]
    fn global_module_exports_bindings_and_metadata() {
        let snap = snapshot(
            vec![entry("Hero", Some("alice")), entry("Footer", None)],
            vec![],
        );
        let output = synthesize(&snap, TS).unwrap();

        assert!(output.global.contains("export const Hero = createBlock('Hero');"));
        assert!(output.global.contains("export const Footer = createBlock('Footer');"));
        assert!(output.global.contains("export const blocks = {\n  Hero,\n  Footer,\n};"));
        assert!(output.global.contains("author: 'alice',"));
        assert!(output.global.contains("author: null,"));
        assert!(output.global.contains("tags: ['ui'],"));
        assert_eq!(output.component_count, 2);
    }

    #[test]
    fn author_module_uses_two_arg_factory_and_default_export() {
        let snap = snapshot(vec![], vec![("alice", vec![entry("Hero", Some("alice"))])]);
        let output = synthesize(&snap, TS).unwrap();

        assert_eq!(output.authors.len(), 1);
        let content = &output.authors[0].content;
        assert!(content.contains("export const Hero = createAuthorBlock('alice', 'Hero');"));
        assert!(content.contains("export default blocks;"));
        assert!(content.contains("author: 'alice',"));
        assert!(content.contains("totalComponents: 1,"));
        // per-entry author is implied by the module, not repeated
        assert!(!content.contains("    author:"));
    }

    #[test]
    fn emission_preserves_input_order() {
        let snap = snapshot(vec![entry("Zeta", None), entry("Alpha", None)], vec![]);
        let output = synthesize(&snap, TS).unwrap();
        let zeta = output.global.find("export const Zeta").unwrap();
        let alpha = output.global.find("export const Alpha").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn synthesis_is_deterministic_for_fixed_timestamp() {
        let snap = snapshot(
            vec![entry("Hero", None), entry("Footer", Some("bob"))],
            vec![("bob", vec![entry("Footer", Some("bob"))])],
        );
        let first = synthesize(&snap, TS).unwrap();
        let second = synthesize(&snap, TS).unwrap();
        assert_eq!(first.global, second.global);
        assert_eq!(first.authors[0].content, second.authors[0].content);
    }

    #[test]
    fn descriptions_round_trip_through_escaping() {
        let mut hero = entry("Hero", None);
        hero.description = "It's a \"test\" block".to_string();
        let snap = snapshot(vec![hero], vec![]);
        let output = synthesize(&snap, TS).unwrap();
        assert!(output
            .global
            .contains("description: 'It\\'s a \"test\" block',"));
    }

    #[test]
    fn invalid_component_name_fails_synthesis() {
        let mut bad = entry("Hero", None);
        bad.component_name = "123Bad-Name".to_string();
        let mut registry = Registry::new();
        registry.insert("123Bad-Name".to_string(), bad);
        let snap = RegistrySnapshot {
            registry,
            ..Default::default()
        };
        let err = synthesize(&snap, TS).unwrap_err();
        assert!(matches!(err, BlockforgeError::InvalidIdentifier { .. }));
    }

    #[test]
    fn key_name_mismatch_is_malformed() {
        let mut registry = Registry::new();
        registry.insert("Hero".to_string(), entry("Footer", None));
        let snap = RegistrySnapshot {
            registry,
            ..Default::default()
        };
        let err = synthesize(&snap, TS).unwrap_err();
        assert!(matches!(err, BlockforgeError::MalformedEntry { .. }));
    }

    #[test]
    fn bad_author_handle_fails_synthesis() {
        let snap = snapshot(vec![], vec![("../evil", vec![entry("Hero", None)])]);
        assert!(matches!(
            synthesize(&snap, TS).unwrap_err(),
            BlockforgeError::InvalidAuthor(_)
        ));
    }

    #[test]
    fn same_name_under_two_authors_is_isolated() {
        let snap = snapshot(
            vec![],
            vec![
                ("alice", vec![entry("Widget", Some("alice"))]),
                ("bob", vec![entry("Widget", Some("bob"))]),
            ],
        );
        let output = synthesize(&snap, TS).unwrap();
        assert_eq!(output.authors.len(), 2);
        assert!(output.authors[0]
            .content
            .contains("createAuthorBlock('alice', 'Widget')"));
        assert!(output.authors[1]
            .content
            .contains("createAuthorBlock('bob', 'Widget')"));
    }

    #[test]
    fn empty_tags_render_as_empty_list() {
        let mut hero = entry("Hero", None);
        hero.tags.clear();
        let snap = snapshot(vec![hero], vec![]);
        let output = synthesize(&snap, TS).unwrap();
        assert!(output.global.contains("tags: [],"));
    }
}
