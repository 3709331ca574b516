use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use myclo_core::{ClosetStore, ClothingItemInput, ImageRef, ImageUploader};
use serde::Deserialize;
use tracing::info;

/// On-disk closet description:
///
/// ```toml
/// [[items]]
/// name = "Sweater"
/// type = "top"
/// thickness = "thick"
/// image = "images/sweater.jpg"   # resolved relative to the closet file
/// ```
#[derive(Debug, Default, Deserialize)]
struct ClosetFile {
    #[serde(default)]
    items: Vec<ClosetFileItem>,
}

#[derive(Debug, Deserialize)]
struct ClosetFileItem {
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    kind: String,
    thickness: Option<String>,
    image: Option<PathBuf>,
    image_ref: Option<String>,
}

/// Reads the closet file, uploads any referenced images, and returns the
/// validated inputs in file order.
pub async fn read_inputs(
    path: &Path,
    uploader: &dyn ImageUploader,
) -> Result<Vec<ClothingItemInput>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("could not read closet file `{}`", path.display()))?;
    let file: ClosetFile = toml::from_str(&raw)
        .with_context(|| format!("could not parse closet file `{}`", path.display()))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut inputs = Vec::with_capacity(file.items.len());
    for (index, entry) in file.items.into_iter().enumerate() {
        let image_ref = match (entry.image, entry.image_ref) {
            (Some(_), Some(_)) => {
                bail!("closet item #{} sets both `image` and `image_ref`", index + 1)
            }
            (Some(image), None) => {
                let image_path = base_dir.join(image);
                let bytes = tokio::fs::read(&image_path)
                    .await
                    .with_context(|| format!("could not read image `{}`", image_path.display()))?;
                let image_ref = uploader
                    .upload(&bytes)
                    .await
                    .with_context(|| format!("could not upload image `{}`", image_path.display()))?;
                Some(image_ref)
            }
            (None, Some(image_ref)) => Some(ImageRef(image_ref)),
            (None, None) => None,
        };

        inputs.push(ClothingItemInput {
            name: entry.name,
            kind: entry.kind,
            thickness: entry.thickness,
            image_ref,
        });
    }

    Ok(inputs)
}

pub async fn load_closet(path: &Path, uploader: &dyn ImageUploader) -> Result<ClosetStore> {
    let mut closet = ClosetStore::new();
    for (index, input) in read_inputs(path, uploader).await?.into_iter().enumerate() {
        closet
            .add(input)
            .with_context(|| {
                format!("closet item #{} in `{}` is invalid", index + 1, path.display())
            })?;
    }

    info!(
        event_name = "cli.closet.loaded",
        path = %path.display(),
        items = closet.len(),
        "closet file loaded"
    );
    Ok(closet)
}
