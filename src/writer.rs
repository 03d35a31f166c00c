use std::path::{Path, PathBuf};

use crate::{
    dashboard::DashboardAsset,
    error::{Error, Result},
};

/// Writes every file of the bundle into `dir`, creating it if needed.
/// Returns the written paths in bundle order.
pub async fn write_asset(dir: &Path, asset: &DashboardAsset) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| Error::AssetWrite {
            path: dir.to_path_buf(),
            source,
        })?;

    let mut written = Vec::with_capacity(asset.files.len());
    for file in &asset.files {
        let path = dir.join(&file.name);
        tokio::fs::write(&path, &file.contents)
            .await
            .map_err(|source| Error::AssetWrite {
                path: path.clone(),
                source,
            })?;
        log::info!("Wrote '{}'", path.display());
        written.push(path);
    }
    Ok(written)
}
