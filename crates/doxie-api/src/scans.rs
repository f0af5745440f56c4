// Scan endpoints: listing, fetching, thumbnails, deletion.
//
// Scan identifiers are the paths reported by `/scans.json` (e.g.
// `/DOXIE/JPEG/IMG_0001.JPG`) and are appended to the endpoint prefix without
// escaping. The combined path is then parsed as a URL, so `.`/`..` segments
// are resolved and characters illegal in a path (spaces, quotes) are
// percent-encoded. Existing `%XX` sequences are left alone.

use std::path::Path;

use tracing::debug;

use crate::client::DoxieClient;
use crate::envelope::Envelope;
use crate::error::Error;
use crate::models::ScanEntry;

impl DoxieClient {
    /// List every scan stored on the device.
    ///
    /// `GET /scans.json`
    pub async fn list_scans(&self) -> Result<Envelope, Error> {
        debug!("listing scans");
        self.get("/scans.json").await
    }

    /// List the most recent scans.
    ///
    /// `GET /scans/recent.json`
    pub async fn list_recent_scans(&self) -> Result<Envelope, Error> {
        debug!("listing recent scans");
        self.get("/scans/recent.json").await
    }

    /// [`list_scans`](Self::list_scans) decoded into [`ScanEntry`] values.
    pub async fn scan_entries(&self) -> Result<Vec<ScanEntry>, Error> {
        self.list_scans().await?.decode()
    }

    /// Fetch a scan.
    ///
    /// `GET /scans{scan_id}`
    ///
    /// Returns the body, or writes it to `dest` and returns `Ack(true)`.
    ///
    /// `scan_id` is not escaped. URL parsing resolves dot segments, so
    /// `"/../hello.json"` requests `/hello.json`, and percent-encodes
    /// spaces (`"/a b.jpg"` becomes `/scans/a%20b.jpg`).
    pub async fn get_scan(&self, scan_id: &str, dest: Option<&Path>) -> Result<Envelope, Error> {
        self.fetch_file(&format!("/scans{scan_id}"), dest).await
    }

    /// Fetch a scan's thumbnail.
    ///
    /// `GET /thumbnails{scan_id}`
    ///
    /// `scan_id` is handled as in [`get_scan`](Self::get_scan).
    pub async fn get_thumbnail(
        &self,
        scan_id: &str,
        dest: Option<&Path>,
    ) -> Result<Envelope, Error> {
        self.fetch_file(&format!("/thumbnails{scan_id}"), dest).await
    }

    /// Delete a single scan.
    ///
    /// `DELETE /scans{scan_id}`
    ///
    /// `scan_id` is not escaped; dot segments are resolved and spaces are
    /// percent-encoded when the URL is parsed.
    pub async fn delete_scan(&self, scan_id: &str) -> Result<Envelope, Error> {
        debug!(scan_id, "deleting scan");
        self.delete(&format!("/scans{scan_id}")).await
    }

    /// Delete several scans in one request.
    ///
    /// `POST /scans/delete.json` with the identifiers as a JSON array.
    pub async fn delete_scans<S: AsRef<str> + Sync>(
        &self,
        scan_ids: &[S],
    ) -> Result<Envelope, Error> {
        let ids: Vec<&str> = scan_ids.iter().map(AsRef::as_ref).collect();
        debug!(count = ids.len(), "deleting scans");
        self.post("/scans/delete.json", &ids).await
    }

    async fn fetch_file(&self, path: &str, dest: Option<&Path>) -> Result<Envelope, Error> {
        let envelope = self.get(path).await?;
        let Some(dest) = dest else {
            return Ok(envelope);
        };

        let contents = envelope.into_file_contents();
        tokio::fs::write(dest, &contents)
            .await
            .map_err(|source| Error::Io {
                path: dest.to_path_buf(),
                source,
            })?;
        debug!(bytes = contents.len(), "wrote {}", dest.display());
        Ok(Envelope::Ack(true))
    }
}
