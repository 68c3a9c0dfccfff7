//! Content items: the closed set of payload kinds attached to modules.
//!
//! Every item composes the shared [`ItemBase`] fields with one
//! [`ItemPayload`] variant. Content entries point at items through an
//! [`ItemRef`], a kind tag plus id, so the set of allowed targets is fixed
//! by [`ItemKind`] rather than discovered at runtime.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::ids::{ItemId, UserId};
use crate::domain::validation::{ValidationError, validate_title};

/// Upload directory for file items.
pub const FILES_UPLOAD_DIR: &str = "files";
/// Upload directory for image items.
pub const IMAGES_UPLOAD_DIR: &str = "images";

/// The kinds of item a content entry may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Text,
    File,
    Image,
    Video,
}

impl ItemKind {
    /// All kinds, in declaration order.
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Text,
        ItemKind::File,
        ItemKind::Image,
        ItemKind::Video,
    ];

    /// Lowercase type name used for template lookup and serialization.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Text => "text",
            ItemKind::File => "file",
            ItemKind::Image => "image",
            ItemKind::Video => "video",
        }
    }

    /// Template name for this kind under `prefix`, e.g. `courses/content/video.html`.
    pub fn template_name(self, prefix: &str) -> String {
        let prefix = prefix.trim_end_matches('/');
        if prefix.is_empty() {
            format!("{}.html", self.as_str())
        } else {
            format!("{prefix}/{}.html", self.as_str())
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ItemKind::Text),
            "file" => Ok(ItemKind::File),
            "image" => Ok(ItemKind::Image),
            "video" => Ok(ItemKind::Video),
            _ => Err(format!("Unknown item kind: {s}")),
        }
    }
}

/// Typed reference from a content entry to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    pub kind: ItemKind,
    pub id: ItemId,
}

impl ItemRef {
    pub fn new(kind: ItemKind, id: ItemId) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Reference to stored blob data, relative to the media root.
///
/// Only the path is modeled; the bytes live in external blob storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobRef(String);

impl BlobRef {
    /// Builds the reference for `file_name` uploaded into `upload_dir`.
    ///
    /// Directory components of `file_name` are dropped.
    pub fn upload(upload_dir: &str, file_name: &str) -> Self {
        let base_name = file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(file_name);
        Self(format!("{}/{base_name}", upload_dir.trim_end_matches('/')))
    }

    /// Wraps an already stored path.
    pub fn from_path(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &str {
        &self.0
    }

    /// Final path component.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// MIME type guessed from the file extension.
    pub fn mime(&self) -> mime_guess::Mime {
        mime_guess::from_path(&self.0).first_or_octet_stream()
    }

    fn validate_under(&self, upload_dir: &str) -> Result<(), ValidationError> {
        let within = self
            .0
            .strip_prefix(upload_dir)
            .and_then(|rest| rest.strip_prefix('/'))
            .is_some_and(|name| !name.is_empty());

        if within {
            Ok(())
        } else {
            Err(ValidationError::InvalidUploadPath {
                path: self.0.clone(),
                expected_prefix: upload_dir.to_string(),
            })
        }
    }
}

impl fmt::Display for BlobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Variant-specific data of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemPayload {
    Text { content: String },
    File { file: BlobRef },
    Image { image: BlobRef },
    Video { url: Url },
}

impl ItemPayload {
    /// Text payload.
    pub fn text(content: impl Into<String>) -> Self {
        ItemPayload::Text {
            content: content.into(),
        }
    }

    /// File payload for an upload named `file_name`.
    pub fn file(file_name: &str) -> Self {
        ItemPayload::File {
            file: BlobRef::upload(FILES_UPLOAD_DIR, file_name),
        }
    }

    /// Image payload for an upload named `file_name`.
    pub fn image(file_name: &str) -> Self {
        ItemPayload::Image {
            image: BlobRef::upload(IMAGES_UPLOAD_DIR, file_name),
        }
    }

    /// Video payload from an external URL.
    ///
    /// # Errors
    /// - `ValidationError::InvalidVideoUrl` - Not an absolute http(s) URL
    pub fn video(url: &str) -> Result<Self, ValidationError> {
        let parsed = Url::parse(url).map_err(|_| ValidationError::InvalidVideoUrl {
            url: url.to_string(),
        })?;
        let payload = ItemPayload::Video { url: parsed };
        payload.validate()?;
        Ok(payload)
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            ItemPayload::Text { .. } => ItemKind::Text,
            ItemPayload::File { .. } => ItemKind::File,
            ItemPayload::Image { .. } => ItemKind::Image,
            ItemPayload::Video { .. } => ItemKind::Video,
        }
    }

    /// Validates the payload against its kind's field rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            ItemPayload::Text { .. } => Ok(()),
            ItemPayload::File { file } => file.validate_under(FILES_UPLOAD_DIR),
            ItemPayload::Image { image } => {
                image.validate_under(IMAGES_UPLOAD_DIR)?;
                let mime = image.mime();
                if mime.type_() != mime_guess::mime::IMAGE {
                    return Err(ValidationError::NotAnImage {
                        path: image.path().to_string(),
                        mime: mime.to_string(),
                    });
                }
                Ok(())
            }
            ItemPayload::Video { url } => {
                if matches!(url.scheme(), "http" | "https") && url.has_host() {
                    Ok(())
                } else {
                    Err(ValidationError::InvalidVideoUrl {
                        url: url.to_string(),
                    })
                }
            }
        }
    }
}

/// Fields shared by every item kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemBase {
    pub owner: UserId,
    pub title: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Input for creating an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    pub owner: UserId,
    pub title: String,
    pub payload: ItemPayload,
}

impl NewItem {
    pub fn new(owner: UserId, title: impl Into<String>, payload: ItemPayload) -> Self {
        Self {
            owner,
            title: title.into(),
            payload,
        }
    }
}

/// A stored content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    #[serde(flatten)]
    base: ItemBase,
    payload: ItemPayload,
}

impl Item {
    /// Creates a new item stamped with the current time.
    ///
    /// # Errors
    /// - `ValidationError` - Title or payload breaks a field rule
    pub fn new(new: NewItem) -> Result<Self, ValidationError> {
        validate_title(&new.title)?;
        new.payload.validate()?;

        let now = Utc::now();
        Ok(Self {
            id: ItemId::new(),
            base: ItemBase {
                owner: new.owner,
                title: new.title,
                created: now,
                updated: now,
            },
            payload: new.payload,
        })
    }

    /// Replaces the title and/or payload and bumps `updated`.
    ///
    /// The item keeps its kind: a payload of another kind is rejected.
    ///
    /// # Errors
    /// - `ValidationError::KindChanged` - Payload kind differs from the item's kind
    /// - `ValidationError` - New title or payload breaks a field rule
    pub fn update(
        &mut self,
        title: Option<String>,
        payload: Option<ItemPayload>,
    ) -> Result<(), ValidationError> {
        if let Some(title) = &title {
            validate_title(title)?;
        }
        if let Some(payload) = &payload {
            if payload.kind() != self.kind() {
                return Err(ValidationError::KindChanged {
                    from: self.kind(),
                    to: payload.kind(),
                });
            }
            payload.validate()?;
        }

        if let Some(title) = title {
            self.base.title = title;
        }
        if let Some(payload) = payload {
            self.payload = payload;
        }
        self.base.updated = Utc::now().max(self.base.updated);
        Ok(())
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn kind(&self) -> ItemKind {
        self.payload.kind()
    }

    /// Reference suitable for a content entry.
    pub fn item_ref(&self) -> ItemRef {
        ItemRef::new(self.kind(), self.id)
    }

    pub fn base(&self) -> &ItemBase {
        &self.base
    }

    pub fn title(&self) -> &str {
        &self.base.title
    }

    pub fn owner(&self) -> UserId {
        self.base.owner
    }

    pub fn payload(&self) -> &ItemPayload {
        &self.payload
    }

    /// Template name used to render this item.
    pub fn template_name(&self, prefix: &str) -> String {
        self.kind().template_name(prefix)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_item(title: &str) -> Item {
        Item::new(NewItem::new(UserId::new(), title, ItemPayload::text("Body")))
            .unwrap()
    }

    #[test]
    fn test_kind_follows_payload() {
        let video = ItemPayload::video("https://videos.example.com/watch?v=42").unwrap();
        let item = Item::new(NewItem::new(UserId::new(), "Lecture", video)).unwrap();

        assert_eq!(item.kind(), ItemKind::Video);
        assert_eq!(item.item_ref(), ItemRef::new(ItemKind::Video, item.id()));
        assert_eq!(
            item.template_name("courses/content"),
            "courses/content/video.html"
        );
    }

    #[test]
    fn test_video_requires_http_url() {
        assert!(ItemPayload::video("https://example.com/v.mp4").is_ok());
        assert!(matches!(
            ItemPayload::video("ftp://example.com/v.mp4"),
            Err(ValidationError::InvalidVideoUrl { .. })
        ));
        assert!(matches!(
            ItemPayload::video("not a url"),
            Err(ValidationError::InvalidVideoUrl { .. })
        ));
    }

    #[test]
    fn test_blob_uploads_land_in_their_directory() {
        let file = ItemPayload::file("../../etc/notes.pdf");
        assert_eq!(
            file,
            ItemPayload::File {
                file: BlobRef::from_path("files/notes.pdf")
            }
        );
        assert!(file.validate().is_ok());

        let misplaced = ItemPayload::File {
            file: BlobRef::from_path("images/notes.pdf"),
        };
        assert!(matches!(
            misplaced.validate(),
            Err(ValidationError::InvalidUploadPath { .. })
        ));
    }

    #[test]
    fn test_image_payload_must_be_an_image() {
        assert!(ItemPayload::image("diagram.png").validate().is_ok());
        assert!(matches!(
            ItemPayload::image("slides.pdf").validate(),
            Err(ValidationError::NotAnImage { .. })
        ));
    }

    #[test]
    fn test_update_keeps_kind_and_bumps_updated() {
        let mut item = text_item("Notes");
        let created = item.base().created;

        item.update(Some("Revised notes".to_string()), Some(ItemPayload::text("New body")))
            .unwrap();
        assert_eq!(item.title(), "Revised notes");
        assert_eq!(item.base().created, created);
        assert!(item.base().updated >= created);

        let result = item.update(None, Some(ItemPayload::image("photo.jpg")));
        assert_eq!(
            result,
            Err(ValidationError::KindChanged {
                from: ItemKind::Text,
                to: ItemKind::Image
            })
        );
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in ItemKind::ALL {
            assert_eq!(kind.as_str().parse::<ItemKind>(), Ok(kind));
        }
        assert!("audio".parse::<ItemKind>().is_err());
    }
}
