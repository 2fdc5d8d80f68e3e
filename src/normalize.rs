//! Pure conversion from provider-shaped records to the internal model.
//!
//! The provider marks unavailable fields with the literal string `"N/A"`.
//! That sentinel must never leak past this module: every string field goes
//! through [`optional_text`], and ratings entries carrying it are dropped.

use crate::models::{MediaKind, MovieDetail, MovieSummary, ScoreEntry};
use crate::omdb::{RawDetail, RawSummary};

const UNAVAILABLE: &str = "N/A";

/// Maps the provider's "field not available" sentinel to an empty string.
pub fn optional_text(raw: &str) -> String {
    if raw == UNAVAILABLE {
        String::new()
    } else {
        raw.to_string()
    }
}

pub fn to_summary(raw: &RawSummary) -> MovieSummary {
    MovieSummary {
        id: raw.imdb_id.clone(),
        title: optional_text(&raw.title),
        year: optional_text(&raw.year),
        poster_url: optional_text(&raw.poster),
        kind: MediaKind::parse(&raw.media_type),
    }
}

pub fn to_detail(raw: &RawDetail) -> MovieDetail {
    let ratings = raw
        .ratings
        .iter()
        .filter(|r| r.source != UNAVAILABLE && r.value != UNAVAILABLE)
        .map(|r| ScoreEntry {
            source: r.source.clone(),
            value: r.value.clone(),
        })
        .collect();

    MovieDetail {
        id: raw.imdb_id.clone(),
        title: optional_text(&raw.title),
        year: optional_text(&raw.year),
        rated: optional_text(&raw.rated),
        released: optional_text(&raw.released),
        runtime: optional_text(&raw.runtime),
        genre: optional_text(&raw.genre),
        director: optional_text(&raw.director),
        writer: optional_text(&raw.writer),
        actors: optional_text(&raw.actors),
        plot: optional_text(&raw.plot),
        language: optional_text(&raw.language),
        country: optional_text(&raw.country),
        awards: optional_text(&raw.awards),
        poster_url: optional_text(&raw.poster),
        ratings,
        metascore: optional_text(&raw.metascore),
        imdb_rating: optional_text(&raw.imdb_rating),
        imdb_votes: optional_text(&raw.imdb_votes),
        kind: MediaKind::parse(&raw.media_type),
        box_office: optional_text(&raw.box_office),
        production: optional_text(&raw.production),
    }
}
