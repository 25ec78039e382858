//! Display the remote catalogue without generating anything.

use crate::config;
use crate::error::Result;
use crate::registry::RegistryClient;
use crate::ui as output;

pub fn run() -> Result<()> {
    let cfg = config::load()?;
    let client = RegistryClient::new(&cfg)?;
    let snapshot = client.fetch_snapshot()?;

    output::header("Registry");
    output::keyval("Endpoint", client.endpoint());
    output::keyval("Blocks", &snapshot.meta.total_blocks.to_string());
    output::keyval("Components", &snapshot.registry.len().to_string());
    output::keyval("Authors", &snapshot.author_registry.len().to_string());
    if !snapshot.meta.last_updated.is_empty() {
        output::keyval("Last updated", &snapshot.meta.last_updated);
    }

    if !snapshot.author_registry.is_empty() {
        output::separator();
        for (author, registry) in &snapshot.author_registry {
            output::indent(&format!("{} ({})", author, registry.len()), 1);
            if output::is_verbose() {
                for entry in registry.values() {
                    output::indent(
                        &format!("{} - {}", entry.component_name, entry.title),
                        2,
                    );
                }
            }
        }
    }

    Ok(())
}
