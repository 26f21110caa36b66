//! Schema values for every catalog entity kind
//!
//! Field names follow the upstream's record layout (Indonesian keys such as
//! `judul`/`sinopsis` are kept verbatim, callers depend on them).

use super::record::{
    CollectionField, DefaultValue, FieldRule, OptionalField, RecordSchema, RequiredField,
};

const DEFAULT_GENRES: DefaultValue = DefaultValue::TextList(&["Anime"]);

/// Required fields shared by the flat "anime card" items
const CARD_FIELDS: &[RequiredField] = &[
    RequiredField::new("judul", FieldRule::Title),
    RequiredField::new("url", FieldRule::Url),
    RequiredField::new("anime_slug", FieldRule::Slug),
    RequiredField::new("cover", FieldRule::ImageUrl),
];

/// Home page weekly top-ranked entry
pub static TOP_RANKED_ITEM: RecordSchema = RecordSchema {
    kind: "top_ranked",
    required: CARD_FIELDS,
    optional: &[
        OptionalField::new("rating", DefaultValue::Unknown),
        OptionalField::new("genres", DEFAULT_GENRES),
    ],
    collections: &[],
    retain_unknown: true,
};

/// Latest released episode entry (home `new_eps` and the latest-episodes list)
pub static LATEST_EPISODE_ITEM: RecordSchema = RecordSchema {
    kind: "latest_episode",
    required: CARD_FIELDS,
    optional: &[
        OptionalField::new("episode", DefaultValue::Unknown),
        OptionalField::new("rilis", DefaultValue::Unknown),
        OptionalField::new("uploader", DefaultValue::Unknown),
    ],
    collections: &[],
    retain_unknown: true,
};

/// Movie list entry
pub static MOVIE_ITEM: RecordSchema = RecordSchema {
    kind: "movie",
    required: CARD_FIELDS,
    optional: &[
        OptionalField::new("tanggal", DefaultValue::Unknown),
        OptionalField::new("genres", DEFAULT_GENRES),
        OptionalField::new("status", DefaultValue::Unknown),
        OptionalField::new("skor", DefaultValue::Unknown),
        OptionalField::new("sinopsis", DefaultValue::Unknown),
        OptionalField::new("views", DefaultValue::Unknown),
    ],
    collections: &[],
    retain_unknown: true,
};

/// Search hit
pub static SEARCH_ITEM: RecordSchema = RecordSchema {
    kind: "search",
    required: CARD_FIELDS,
    optional: &[
        OptionalField::new("status", DefaultValue::Unknown),
        OptionalField::new("tipe", DefaultValue::Unknown),
        OptionalField::new("skor", DefaultValue::Unknown),
        OptionalField::new("penonton", DefaultValue::Unknown),
        OptionalField::new("sinopsis", DefaultValue::Unknown),
        OptionalField::new("genre", DEFAULT_GENRES),
    ],
    collections: &[],
    retain_unknown: true,
};

/// Release schedule entry
pub static SCHEDULE_ITEM: RecordSchema = RecordSchema {
    kind: "schedule",
    required: &[
        RequiredField::new("title", FieldRule::Title),
        RequiredField::new("url", FieldRule::Url),
        RequiredField::new("anime_slug", FieldRule::Slug),
        RequiredField::new("cover_url", FieldRule::ImageUrl),
    ],
    optional: &[
        OptionalField::new("type", DefaultValue::Text("TV")),
        OptionalField::new("score", DefaultValue::Unknown),
        OptionalField::new("genres", DEFAULT_GENRES),
        OptionalField::new("release_time", DefaultValue::Unknown),
    ],
    collections: &[],
    retain_unknown: true,
};

/// Episode inside an anime-detail document
pub static EPISODE_ITEM: RecordSchema = RecordSchema {
    kind: "episode",
    required: &[
        RequiredField::new("episode", FieldRule::NonEmpty),
        RequiredField::new("title", FieldRule::Title),
        RequiredField::new("url", FieldRule::Url),
        RequiredField::new("episode_slug", FieldRule::Slug),
    ],
    optional: &[OptionalField::new("release_date", DefaultValue::Unknown)],
    collections: &[],
    retain_unknown: true,
};

/// Recommendation inside an anime-detail document
pub static RECOMMENDATION_ITEM: RecordSchema = RecordSchema {
    kind: "recommendation",
    required: &[
        RequiredField::new("title", FieldRule::Title),
        RequiredField::new("url", FieldRule::Url),
        RequiredField::new("anime_slug", FieldRule::Slug),
        RequiredField::new("cover_url", FieldRule::ImageUrl),
    ],
    optional: &[
        OptionalField::new("rating", DefaultValue::Unknown),
        OptionalField::new("episode", DefaultValue::Unknown),
    ],
    collections: &[],
    retain_unknown: true,
};

/// Streaming server inside an episode-detail document
pub static STREAMING_SERVER: RecordSchema = RecordSchema {
    kind: "streaming_server",
    required: &[
        RequiredField::new("server_name", FieldRule::NonEmpty),
        RequiredField::new("streaming_url", FieldRule::Url),
    ],
    optional: &[],
    collections: &[],
    retain_unknown: true,
};

/// Anime detail document
pub static ANIME_DETAIL: RecordSchema = RecordSchema {
    kind: "anime_detail",
    required: &[
        RequiredField::new("judul", FieldRule::Title),
        RequiredField::new("url_anime", FieldRule::Url),
        RequiredField::new("anime_slug", FieldRule::Slug),
        RequiredField::new("url_cover", FieldRule::ImageUrl),
    ],
    optional: &[
        OptionalField::new("status", DefaultValue::Unknown),
        OptionalField::new("tipe", DefaultValue::Unknown),
        OptionalField::new("skor", DefaultValue::Unknown),
        OptionalField::new("penonton", DefaultValue::Unknown),
        OptionalField::new("sinopsis", DefaultValue::Unknown),
        OptionalField::new("genre", DEFAULT_GENRES),
        OptionalField::new("details", DefaultValue::EmptyObject),
        OptionalField::new(
            "rating",
            DefaultValue::Object(&[("score", Some("N/A")), ("users", Some("N/A"))]),
        ),
    ],
    collections: &[
        CollectionField {
            name: "episode_list",
            item: &EPISODE_ITEM,
            required: true,
        },
        CollectionField {
            name: "recommendations",
            item: &RECOMMENDATION_ITEM,
            required: false,
        },
    ],
    retain_unknown: false,
};

/// Episode detail document
pub static EPISODE_DETAIL: RecordSchema = RecordSchema {
    kind: "episode_detail",
    required: &[
        RequiredField::new("title", FieldRule::Title),
        RequiredField::new("thumbnail_url", FieldRule::ImageUrl)
            .with_fallback(&["anime_info", "thumbnail_url"]),
    ],
    optional: &[
        OptionalField::new("release_info", DefaultValue::Unknown),
        OptionalField::new("download_links", DefaultValue::EmptyObject),
        OptionalField::new(
            "navigation",
            DefaultValue::Object(&[
                ("previous_episode_url", None),
                ("next_episode_url", None),
                ("all_episodes_url", None),
            ]),
        ),
        OptionalField::new("anime_info", DefaultValue::EmptyObject),
        OptionalField::new("other_episodes", DefaultValue::EmptyList),
    ],
    collections: &[CollectionField {
        name: "streaming_servers",
        item: &STREAMING_SERVER,
        required: true,
    }],
    retain_unknown: false,
};
