//! Photo acquisition boundary
//!
//! The engine records photo references only; materializing bytes on disk
//! belongs to this collaborator, invoked by front ends at display time.

use std::future::Future;
use std::path::{Path, PathBuf};

use cragscout_types::PhotoRef;

/// Collaborator that downloads a photo into a category directory and
/// reports where it landed.
pub trait PhotoSink: Send + Sync {
    fn download(
        &self,
        photo: &PhotoRef,
        category: &str,
    ) -> impl Future<Output = std::io::Result<PathBuf>> + Send;
}

/// Destination path a sink is expected to write `photo` to.
pub fn destination(image_dir: &Path, category: &str, photo: &PhotoRef) -> PathBuf {
    image_dir.join(category).join(&photo.filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingSink;

    impl PhotoSink for RecordingSink {
        async fn download(&self, photo: &PhotoRef, category: &str) -> std::io::Result<PathBuf> {
            Ok(destination(Path::new("/tmp/images"), category, photo))
        }
    }

    #[tokio::test]
    async fn sink_targets_the_category_directory() {
        let photo = PhotoRef::for_climb("Moonbeam", "https://img.example.com/p/1.jpg?s=2");
        let path = RecordingSink.download(&photo, "search_images").await.unwrap();
        assert_eq!(
            path,
            Path::new("/tmp/images/search_images/Moonbeam1.jpg")
        );
    }
}
