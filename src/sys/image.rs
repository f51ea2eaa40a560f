use anyhow::{Result, Context};
use image::DynamicImage;

pub async fn download_image(http: &reqwest::Client, url: &str) -> Result<DynamicImage> {
    let bytes = http
        .get(url)
        .send()
        .await?
        .error_for_status()
        .with_context(|| format!("Thumbnail request failed: {}", url))?
        .bytes()
        .await?;
    let img = image::load_from_memory(&bytes)
        .context("Failed to decode image")?;
    Ok(img)
}
