//! Example: rendering an order list as a table.

use apiserver_kit::{
    core::{GroupResource, MetadataDescriptions, ObjectList, ObjectMeta, Object},
    rest::TableConvertor,
    DefaultStrategy, RequestContext,
};
use serde::Serialize;
use tracing::*;

#[derive(Serialize, Debug)]
struct Order {
    metadata: ObjectMeta,
}

impl Object for Order {
    fn meta(&self) -> Option<&ObjectMeta> {
        Some(&self.metadata)
    }

    fn meta_mut(&mut self) -> Option<&mut ObjectMeta> {
        Some(&mut self.metadata)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // DESCRIPTIONS may point at a yaml mapping of metadata field to column description
    let descriptions = match std::env::var("DESCRIPTIONS") {
        Ok(path) => MetadataDescriptions::from_yaml(&std::fs::read_to_string(path)?)?,
        Err(_) => MetadataDescriptions::default(),
    };
    let strategy =
        DefaultStrategy::new(GroupResource::new("arc.bwi.de", "orders")).with_descriptions(descriptions);

    let orders = ObjectList::new(
        ["alpha", "beta", "gamma"]
            .into_iter()
            .map(|name| Order {
                metadata: ObjectMeta {
                    name: Some(name.into()),
                    ..ObjectMeta::default()
                },
            })
            .collect(),
    );
    let table = strategy.convert_to_table(&RequestContext::new(), &orders, None)?;
    info!("rendered {} rows", table.rows.len());
    println!("{}", serde_json::to_string_pretty(&table)?);
    Ok(())
}
