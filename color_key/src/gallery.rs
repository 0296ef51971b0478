// THEORY:
// The gallery is the landing page of the tool set: one card per tool. Its layout on
// disk is
//
//   <root>/pages.json            ["color_filter", "cool_squares", ...]
//   <root>/<tool>/meta.json      { "title": ..., "description": ..., "image": ... }
//   <root>/<tool>/<image>        preview picture
//   <root>/<tool>/index.html     the tool itself
//
// The index is required; without it there is nothing to show and loading fails.
// Everything below it is best effort. A tool whose meta is missing or malformed is
// skipped with a warning, and a missing preview image leaves the card without a
// picture. All metas are read concurrently and cards keep the index order.

use crate::error::{ColorKeyError, Result};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const INDEX_FILE: &str = "pages.json";
pub const META_FILE: &str = "meta.json";
pub const ENTRY_FILE: &str = "index.html";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMeta {
    pub title: String,
    pub description: String,
    /// Preview image path, relative to the tool's directory.
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolCard {
    /// Directory name of the tool.
    pub name: String,
    pub title: String,
    pub description: String,
    /// Preview image, if it could be found.
    pub image: Option<PathBuf>,
    /// Relative link to the tool's entry page.
    pub link: String,
}

/// Loads every tool listed in `root/pages.json`.
pub async fn load_gallery(root: &Path) -> Result<Vec<ToolCard>> {
    let index_path = root.join(INDEX_FILE);
    let index_error = |reason: String| ColorKeyError::GalleryIndex {
        path: index_path.clone(),
        reason,
    };
    let text = tokio::fs::read_to_string(&index_path)
        .await
        .map_err(|err| index_error(err.to_string()))?;
    let pages: Vec<String> = serde_json::from_str(&text).map_err(|err| index_error(err.to_string()))?;
    debug!(tools = pages.len(), "gallery index loaded");

    let cards = join_all(pages.iter().map(|name| load_card(root, name))).await;
    Ok(cards
        .into_iter()
        .filter_map(|card| match card {
            Ok(card) => Some(card),
            Err(err) => {
                warn!(%err, "skipping tool");
                None
            }
        })
        .collect())
}

async fn load_card(root: &Path, name: &str) -> Result<ToolCard> {
    let tool_dir = root.join(name);
    let meta = load_meta(&tool_dir.join(META_FILE)).await?;

    let image_path = tool_dir.join(&meta.image);
    let found = tokio::fs::metadata(&image_path).await;
    let image = match found {
        Ok(metadata) if metadata.is_file() => Some(image_path),
        Ok(_) => {
            warn!(tool = name, path = %image_path.display(), "preview is not a file");
            None
        }
        Err(err) => {
            let err = ColorKeyError::AssetLoad {
                path: image_path,
                reason: err.to_string(),
            };
            warn!(tool = name, %err, "preview image unavailable");
            None
        }
    };

    Ok(ToolCard {
        name: name.to_string(),
        title: meta.title,
        description: meta.description,
        image,
        link: format!("{name}/{ENTRY_FILE}"),
    })
}

async fn load_meta(path: &Path) -> Result<ToolMeta> {
    let asset_error = |reason: String| ColorKeyError::AssetLoad {
        path: path.to_path_buf(),
        reason,
    };
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| asset_error(err.to_string()))?;
    serde_json::from_str(&text).map_err(|err| asset_error(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn write_tool(root: &Path, name: &str, meta: &str, image: Option<&str>) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(META_FILE), meta).unwrap();
        if let Some(image) = image {
            fs::write(dir.join(image), b"png").unwrap();
        }
    }

    #[tokio::test]
    async fn loads_cards_in_index_order() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join(INDEX_FILE), r#"["rings", "filter"]"#).unwrap();
        write_tool(
            root.path(),
            "filter",
            r#"{"title":"Color Filter","description":"Keep only palette colors","image":"preview.png"}"#,
            Some("preview.png"),
        );
        write_tool(
            root.path(),
            "rings",
            r#"{"title":"Rings","description":"Concentric rings","image":"rings.png"}"#,
            None,
        );

        let cards = load_gallery(root.path()).await.unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name, "rings");
        assert_eq!(cards[0].image, None);
        assert_eq!(cards[0].link, "rings/index.html");
        assert_eq!(cards[1].title, "Color Filter");
        assert_eq!(cards[1].image, Some(root.path().join("filter").join("preview.png")));
    }

    #[tokio::test]
    async fn skips_tools_without_usable_meta() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join(INDEX_FILE), r#"["missing", "broken", "ok"]"#).unwrap();
        write_tool(root.path(), "broken", "{ nope", None);
        write_tool(
            root.path(),
            "ok",
            r#"{"title":"Ok","description":"","image":"a.png"}"#,
            Some("a.png"),
        );

        let cards = load_gallery(root.path()).await.unwrap();
        assert_eq!(cards.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(), vec!["ok"]);
    }

    #[tokio::test]
    async fn missing_index_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let err = load_gallery(root.path()).await.unwrap_err();
        assert!(matches!(err, ColorKeyError::GalleryIndex { .. }));

        fs::write(root.path().join(INDEX_FILE), "{}").unwrap();
        let err = load_gallery(root.path()).await.unwrap_err();
        assert!(matches!(err, ColorKeyError::GalleryIndex { .. }));
    }
}
