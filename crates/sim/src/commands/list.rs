//! Catalog listing.

use anyhow::Result;
use clap::Parser;

use super::Content;

/// List encounters and parties in the catalog
#[derive(Parser)]
pub struct List {}

impl List {
    pub fn execute(self, content: &Content) -> Result<()> {
        println!("Encounters:");
        for encounter in content.catalog.encounters() {
            let enemies: Vec<&str> = encounter
                .enemies
                .iter()
                .map(|spawn| spawn.template.as_str())
                .collect();
            println!("  {:<18} {}", encounter.id.as_str(), enemies.join(", "));
        }
        println!("Parties:");
        for party in content.catalog.parties() {
            let members: Vec<&str> = party
                .members
                .iter()
                .map(|spawn| spawn.template.as_str())
                .collect();
            let djinn: Vec<&str> = party.djinn.iter().map(|id| id.as_str()).collect();
            println!(
                "  {:<18} {} [{}]",
                party.id,
                members.join(", "),
                djinn.join(", ")
            );
        }
        Ok(())
    }
}
