//! Flat JSON records for the stored rows. Absent optional columns serialize as
//! `null` rather than being skipped.

use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::{director, genre, movie};

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct MovieRecord {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub trailer: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre_id: Option<i32>,
    pub director_id: Option<i32>,
}

impl From<movie::Model> for MovieRecord {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            trailer: m.trailer,
            year: m.year,
            rating: m.rating,
            genre_id: m.genre_id,
            director_id: m.director_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct NamedRecord {
    pub id: i32,
    pub name: String,
}

impl From<director::Model> for NamedRecord {
    fn from(m: director::Model) -> Self {
        Self { id: m.id, name: m.name }
    }
}

impl From<genre::Model> for NamedRecord {
    fn from(m: genre::Model) -> Self {
        Self { id: m.id, name: m.name }
    }
}

pub fn dump<M, R: From<M>>(row: M) -> R {
    R::from(row)
}

pub fn dump_many<M, R: From<M>>(rows: Vec<M>) -> Vec<R> {
    rows.into_iter().map(R::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_record_keeps_nulls() {
        let record: MovieRecord = dump(movie::Model {
            id: 7,
            title: "A".into(),
            description: "B".into(),
            trailer: None,
            year: Some(2000),
            rating: None,
            genre_id: None,
            director_id: Some(2),
        });
        let value = serde_json::to_value(record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 7,
                "title": "A",
                "description": "B",
                "trailer": null,
                "year": 2000,
                "rating": null,
                "genre_id": null,
                "director_id": 2,
            })
        );
    }

    #[test]
    fn dump_many_preserves_order() {
        let rows = vec![
            genre::Model { id: 2, name: "Drama".into() },
            genre::Model { id: 1, name: "Comedy".into() },
        ];
        let records: Vec<NamedRecord> = dump_many(rows);
        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 1]);
    }
}
