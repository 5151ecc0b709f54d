//! Print the OpenAPI document as JSON.

use color_eyre::eyre::Result;
use users_api::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    println!("{}", ApiDoc::openapi().to_pretty_json()?);
    Ok(())
}
