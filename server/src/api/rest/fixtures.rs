//! Canned payloads returned in place of real backend data.

use serde::Serialize;

// ============================================================================
// FILES
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileItem {
    pub id: &'static str,
    pub name: &'static str,
    pub path: &'static str,
    pub space_type: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub size: u64,
    pub last_modified: &'static str,
    pub download_url: &'static str,
}

pub const DEFAULT_SPACE_TYPE: &str = "personal";

pub fn sample_file(space_type: Option<&str>) -> FileItem {
    FileItem {
        id: "file_123456",
        name: "Q3 project summary.pptx",
        path: "/My Space/Work/Reports/Q3 project summary.pptx",
        space_type: space_type.unwrap_or(DEFAULT_SPACE_TYPE).to_string(),
        kind: "presentation",
        size: 2_048_576,
        last_modified: "2023-10-25T15:30:00Z",
        download_url: "https://nas.example/download?token=xxx",
    }
}

// ============================================================================
// MEDIA
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub thumbnail_url: &'static str,
    pub preview_url: &'static str,
    pub original_file: OriginalFile,
    pub ai_metadata: AiMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalFile {
    pub file_id: &'static str,
    pub name: &'static str,
    pub path: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiMetadata {
    pub scenes: &'static [&'static str],
    pub objects: &'static [&'static str],
    pub colors: &'static [&'static str],
    pub estimated_time: &'static str,
}

pub const DEFAULT_MEDIA_TYPE: &str = "all";

pub fn sample_media(media_type: Option<&str>) -> MediaItem {
    let kind = if media_type.unwrap_or(DEFAULT_MEDIA_TYPE) == "video" {
        "video"
    } else {
        "photo"
    };

    MediaItem {
        id: "media_987654",
        kind,
        thumbnail_url: "https://nas.example/thumbnail?token=xxx",
        preview_url: "https://nas.example/preview?token=xxx",
        original_file: OriginalFile {
            file_id: "file_135790",
            name: "IMG_20220715_183045.mp4",
            path: "/My Space/Album/Summer 2022/IMG_20220715_183045.mp4",
        },
        ai_metadata: AiMetadata {
            scenes: &["beach", "sunset"],
            objects: &["dog", "person"],
            colors: &["orange", "blue"],
            estimated_time: "2022-07-15T18:30:00Z",
        },
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumCategory {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub cover_media_id: &'static str,
    pub media_count: u32,
}

pub const ALBUM_CATEGORIES: [AlbumCategory; 4] = [
    AlbumCategory {
        id: "cat_person_1",
        name: "Xiaoming",
        kind: "person",
        cover_media_id: "media_987654",
        media_count: 42,
    },
    AlbumCategory {
        id: "cat_scene_1",
        name: "Beach",
        kind: "scene",
        cover_media_id: "media_123456",
        media_count: 15,
    },
    AlbumCategory {
        id: "cat_pet_1",
        name: "Doggo",
        kind: "pet",
        cover_media_id: "media_111222",
        media_count: 8,
    },
    AlbumCategory {
        id: "cat_location_1",
        name: "Beijing",
        kind: "location",
        cover_media_id: "media_333444",
        media_count: 23,
    },
];

// ============================================================================
// SYSTEM
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub storage: Usage,
    pub memory: Usage,
    pub cpu: CpuUsage,
    /// Seconds since boot.
    pub uptime: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub total: u64,
    pub used: u64,
    pub usage_percentage: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuUsage {
    pub usage_percentage: f64,
}

pub fn system_status() -> SystemStatus {
    SystemStatus {
        // bytes
        storage: Usage {
            total: 42_949_672_960,
            used: 21_474_836_480,
            usage_percentage: 50,
        },
        // MiB
        memory: Usage {
            total: 4096,
            used: 2048,
            usage_percentage: 50,
        },
        cpu: CpuUsage {
            usage_percentage: 15.5,
        },
        uptime: 1_234_567,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_file_space_type() {
        assert_eq!(sample_file(None).space_type, "personal");
        assert_eq!(sample_file(Some("group")).space_type, "group");
    }

    #[test]
    fn test_sample_media_kind() {
        assert_eq!(sample_media(Some("video")).kind, "video");
        assert_eq!(sample_media(Some("photo")).kind, "photo");
        assert_eq!(sample_media(Some("all")).kind, "photo");
        assert_eq!(sample_media(None).kind, "photo");
    }

    #[test]
    fn test_categories_cover_each_type_once() {
        let kinds: Vec<_> = ALBUM_CATEGORIES.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, ["person", "scene", "pet", "location"]);
    }

    #[test]
    fn test_media_item_shape() {
        let value = serde_json::to_value(sample_media(None)).unwrap();
        assert_eq!(value["type"], "photo");
        assert_eq!(value["originalFile"]["fileId"], "file_135790");
        assert!(value["aiMetadata"]["scenes"].is_array());
    }
}
