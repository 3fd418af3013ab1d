//! Handler for the `predict` command.

use serde_json::json;

use crate::adapter::inbound::cli::command::PredictArgs;
use crate::adapter::inbound::cli::output;
use crate::domain::id::ProductId;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::similarity::SimilarityModel;

/// Execute the predict command.
pub async fn execute(config: &Config, args: &PredictArgs) -> Result<()> {
    let product_id = ProductId::new(args.product_id.clone());
    let gateway = bootstrap::build_gateway(&config.model);
    let similar = gateway.predict(&product_id).await?;

    if output::is_json() {
        output::document(json!({
            "product_id": product_id,
            "similar": similar,
        }));
        return Ok(());
    }

    if similar.is_empty() {
        output::note(&format!("No similar products for {product_id}"));
        return Ok(());
    }
    // One id per line keeps quiet output pipeable.
    for id in &similar {
        output::item(id);
    }
    Ok(())
}
