use serde::{Deserialize, Deserializer};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};

/// Maps a present key to `Some`, so `Option<Option<T>>` fields can tell an
/// absent key (`None`) apart from an explicit `null` (`Some(None)`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn required(field: &str, value: Option<Option<String>>) -> AppResult<Option<String>> {
    match value {
        Some(None) => Err(AppError::Invalid(format!("{field} must not be null"))),
        Some(Some(v)) => Ok(Some(v)),
        None => Ok(None),
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MovieFilter {
    pub director_id: Option<i32>,
    pub genre_id: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewMovie {
    pub id: Option<i32>,
    pub title: String,
    pub description: String,
    pub trailer: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre_id: Option<i32>,
    pub director_id: Option<i32>,
}

/// Full replacement. Optional fields left out of the body are cleared.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MovieReplace {
    pub title: String,
    pub description: String,
    pub trailer: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre_id: Option<i32>,
    pub director_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MoviePatch {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub trailer: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<f64>)]
    pub rating: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub genre_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub director_id: Option<Option<i32>>,
}

/// A [`MoviePatch`] whose required fields have been checked for `null`.
#[derive(Debug, Default)]
pub struct ValidMoviePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub trailer: Option<Option<String>>,
    pub year: Option<Option<i32>>,
    pub rating: Option<Option<f64>>,
    pub genre_id: Option<Option<i32>>,
    pub director_id: Option<Option<i32>>,
}

impl MoviePatch {
    pub fn validate(self) -> AppResult<ValidMoviePatch> {
        Ok(ValidMoviePatch {
            title: required("title", self.title)?,
            description: required("description", self.description)?,
            trailer: self.trailer,
            year: self.year,
            rating: self.rating,
            genre_id: self.genre_id,
            director_id: self.director_id,
        })
    }
}

/// Creation payload shared by directors and genres.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewNamed {
    pub id: Option<i32>,
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NamedReplace {
    pub name: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NamedPatch {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
}

impl NamedPatch {
    pub fn validate(self) -> AppResult<Option<String>> {
        required("name", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_tells_absent_from_null() {
        let patch: MoviePatch = serde_json::from_str(r#"{"trailer": null, "year": 1999}"#).unwrap();
        assert_eq!(patch.trailer, Some(None));
        assert_eq!(patch.year, Some(Some(1999)));
        assert_eq!(patch.rating, None);
        assert_eq!(patch.title, None);
    }

    #[test]
    fn patch_rejects_null_required_field() {
        let patch: MoviePatch = serde_json::from_str(r#"{"title": null}"#).unwrap();
        let err = patch.validate().unwrap_err();
        assert!(matches!(err, AppError::Invalid(msg) if msg.contains("title")));

        let patch: NamedPatch = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert!(patch.validate().is_err());
    }

    #[test]
    fn new_movie_rejects_unknown_fields() {
        let res = serde_json::from_str::<NewMovie>(
            r#"{"title": "A", "description": "B", "studio": "C"}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn new_movie_requires_title_and_description() {
        assert!(serde_json::from_str::<NewMovie>(r#"{"title": "A"}"#).is_err());
        let movie: NewMovie =
            serde_json::from_str(r#"{"title": "A", "description": "B", "year": 2000}"#).unwrap();
        assert_eq!(movie.year, Some(2000));
        assert_eq!(movie.trailer, None);
    }
}
