use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    entities::{director, genre, movie},
    error::{AppError, AppResult},
    models::{MovieFilter, MovieReplace, NamedReplace, NewMovie, NewNamed, ValidMoviePatch},
};

/// Storage context shared by all handlers.
#[derive(Clone)]
pub struct Catalog {
    db: DatabaseConnection,
}

impl Catalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_movies(&self, filter: &MovieFilter) -> AppResult<Vec<movie::Model>> {
        let mut query = movie::Entity::find();
        if let Some(director_id) = filter.director_id {
            query = query.filter(movie::Column::DirectorId.eq(director_id));
        }
        if let Some(genre_id) = filter.genre_id {
            query = query.filter(movie::Column::GenreId.eq(genre_id));
        }
        Ok(query.order_by_asc(movie::Column::Id).all(&self.db).await?)
    }

    pub async fn get_movie(&self, id: i32) -> AppResult<movie::Model> {
        movie::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("movie", id))
    }

    pub async fn create_movie(&self, new: NewMovie) -> AppResult<movie::Model> {
        let model = movie::ActiveModel {
            id: new.id.map_or(NotSet, Set),
            title: Set(new.title),
            description: Set(new.description),
            trailer: Set(new.trailer),
            year: Set(new.year),
            rating: Set(new.rating),
            genre_id: Set(new.genre_id),
            director_id: Set(new.director_id),
        };
        model.insert(&self.db).await.map_err(|e| AppError::on_insert("movie", e))
    }

    pub async fn replace_movie(&self, id: i32, body: MovieReplace) -> AppResult<()> {
        let movie = movie::ActiveModel {
            id: NotSet,
            title: Set(body.title),
            description: Set(body.description),
            trailer: Set(body.trailer),
            year: Set(body.year),
            rating: Set(body.rating),
            genre_id: Set(body.genre_id),
            director_id: Set(body.director_id),
        };
        self.update_movie(id, movie).await
    }

    pub async fn patch_movie(&self, id: i32, patch: ValidMoviePatch) -> AppResult<()> {
        let movie = movie::ActiveModel {
            id: NotSet,
            title: patch.title.map_or(NotSet, Set),
            description: patch.description.map_or(NotSet, Set),
            trailer: patch.trailer.map_or(NotSet, Set),
            year: patch.year.map_or(NotSet, Set),
            rating: patch.rating.map_or(NotSet, Set),
            genre_id: patch.genre_id.map_or(NotSet, Set),
            director_id: patch.director_id.map_or(NotSet, Set),
        };
        self.update_movie(id, movie).await
    }

    /// One `UPDATE` of the set columns; no read precedes the write.
    async fn update_movie(&self, id: i32, movie: movie::ActiveModel) -> AppResult<()> {
        if !movie.is_changed() {
            return self.get_movie(id).await.map(drop);
        }
        let res = movie::Entity::update_many()
            .set(movie)
            .filter(movie::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::not_found("movie", id));
        }
        Ok(())
    }

    pub async fn delete_movie(&self, id: i32) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::not_found("movie", id));
        }
        Ok(())
    }

    pub async fn list_directors(&self) -> AppResult<Vec<director::Model>> {
        Ok(director::Entity::find().order_by_asc(director::Column::Id).all(&self.db).await?)
    }

    pub async fn get_director(&self, id: i32) -> AppResult<director::Model> {
        director::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("director", id))
    }

    pub async fn create_director(&self, new: NewNamed) -> AppResult<director::Model> {
        let model = director::ActiveModel { id: new.id.map_or(NotSet, Set), name: Set(new.name) };
        model.insert(&self.db).await.map_err(|e| AppError::on_insert("director", e))
    }

    /// Replace and patch coincide for directors: `name` is the only column.
    pub async fn rename_director(&self, id: i32, name: Option<String>) -> AppResult<()> {
        let director = director::ActiveModel { id: NotSet, name: name.map_or(NotSet, Set) };
        if !director.is_changed() {
            return self.get_director(id).await.map(drop);
        }
        let res = director::Entity::update_many()
            .set(director)
            .filter(director::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::not_found("director", id));
        }
        Ok(())
    }

    pub async fn replace_director(&self, id: i32, body: NamedReplace) -> AppResult<()> {
        self.rename_director(id, Some(body.name)).await
    }

    pub async fn delete_director(&self, id: i32) -> AppResult<()> {
        let res = director::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::not_found("director", id));
        }
        Ok(())
    }

    pub async fn list_genres(&self) -> AppResult<Vec<genre::Model>> {
        Ok(genre::Entity::find().order_by_asc(genre::Column::Id).all(&self.db).await?)
    }

    pub async fn get_genre(&self, id: i32) -> AppResult<genre::Model> {
        genre::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("genre", id))
    }

    pub async fn create_genre(&self, new: NewNamed) -> AppResult<genre::Model> {
        let model = genre::ActiveModel { id: new.id.map_or(NotSet, Set), name: Set(new.name) };
        model.insert(&self.db).await.map_err(|e| AppError::on_insert("genre", e))
    }

    pub async fn rename_genre(&self, id: i32, name: Option<String>) -> AppResult<()> {
        let genre = genre::ActiveModel { id: NotSet, name: name.map_or(NotSet, Set) };
        if !genre.is_changed() {
            return self.get_genre(id).await.map(drop);
        }
        let res = genre::Entity::update_many()
            .set(genre)
            .filter(genre::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::not_found("genre", id));
        }
        Ok(())
    }

    pub async fn replace_genre(&self, id: i32, body: NamedReplace) -> AppResult<()> {
        self.rename_genre(id, Some(body.name)).await
    }

    pub async fn delete_genre(&self, id: i32) -> AppResult<()> {
        let res = genre::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::not_found("genre", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectOptions, ModelTrait};
    use tokio::task::JoinSet;

    use super::*;
    use crate::db::{connect_and_migrate, connect_in_memory};

    fn new_movie(title: &str, director_id: Option<i32>, genre_id: Option<i32>) -> NewMovie {
        NewMovie {
            id: None,
            title: title.to_string(),
            description: format!("about {title}"),
            trailer: None,
            year: None,
            rating: None,
            genre_id,
            director_id,
        }
    }

    #[tokio::test]
    async fn filters_compose_in_query() {
        let catalog = Catalog::new(connect_in_memory().await);
        catalog.create_movie(new_movie("a", Some(1), Some(3))).await.unwrap();
        catalog.create_movie(new_movie("b", Some(1), Some(4))).await.unwrap();
        catalog.create_movie(new_movie("c", Some(2), Some(3))).await.unwrap();
        catalog.create_movie(new_movie("d", None, None)).await.unwrap();

        let all = catalog.list_movies(&MovieFilter::default()).await.unwrap();
        assert_eq!(all.len(), 4);

        let by_genre = catalog
            .list_movies(&MovieFilter { director_id: None, genre_id: Some(3) })
            .await
            .unwrap();
        assert_eq!(by_genre.iter().map(|m| m.title.as_str()).collect::<Vec<_>>(), ["a", "c"]);

        let both = catalog
            .list_movies(&MovieFilter { director_id: Some(1), genre_id: Some(3) })
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].title, "a");
    }

    #[tokio::test]
    async fn patch_without_changes_is_noop() {
        let catalog = Catalog::new(connect_in_memory().await);
        let created = catalog.create_movie(new_movie("a", None, None)).await.unwrap();

        catalog.patch_movie(created.id, ValidMoviePatch::default()).await.unwrap();
        assert_eq!(catalog.get_movie(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn concurrent_patches_on_file_database_all_apply() {
        let path = std::env::temp_dir()
            .join(format!("movie-catalog-concurrent-{}.db", std::process::id()));
        let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
        options.max_connections(5).sqlx_logging(false);
        let catalog = Catalog::new(connect_and_migrate(options).await.unwrap());
        let id = catalog.create_movie(new_movie("a", None, None)).await.unwrap().id;

        let mut tasks = JoinSet::new();
        for year in 0..40 {
            let catalog = catalog.clone();
            tasks.spawn(async move {
                let patch = ValidMoviePatch { year: Some(Some(year)), ..Default::default() };
                catalog.patch_movie(id, patch).await
            });
        }
        let mut failures = Vec::new();
        while let Some(res) = tasks.join_next().await {
            if let Err(err) = res.unwrap() {
                failures.push(err.to_string());
            }
        }

        let year = catalog.get_movie(id).await.unwrap().year;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
        }
        assert!(failures.is_empty(), "{} failed: {:?}", failures.len(), failures.first());
        assert!(matches!(year, Some(0..40)));
    }

    #[tokio::test]
    async fn replace_overwrites_every_column() {
        let catalog = Catalog::new(connect_in_memory().await);
        let created = catalog.create_movie(new_movie("a", Some(1), Some(2))).await.unwrap();

        let body = MovieReplace {
            title: "b".into(),
            description: "c".into(),
            trailer: None,
            year: Some(1968),
            rating: None,
            genre_id: None,
            director_id: None,
        };
        catalog.replace_movie(created.id, body).await.unwrap();

        let movie = catalog.get_movie(created.id).await.unwrap();
        assert_eq!(movie.title, "b");
        assert_eq!(movie.year, Some(1968));
        assert_eq!((movie.director_id, movie.genre_id), (None, None));
    }

    #[tokio::test]
    async fn mutations_on_missing_rows_are_not_found() {
        let catalog = Catalog::new(connect_in_memory().await);

        let err = catalog.patch_movie(42, ValidMoviePatch::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = catalog.rename_director(42, Some("x".into())).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = catalog.delete_genre(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_explicit_id_conflicts() {
        let catalog = Catalog::new(connect_in_memory().await);
        catalog.create_genre(NewNamed { id: Some(5), name: "Drama".into() }).await.unwrap();

        let err =
            catalog.create_genre(NewNamed { id: Some(5), name: "Noir".into() }).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn deleting_director_leaves_dangling_reference() {
        let db = connect_in_memory().await;
        let catalog = Catalog::new(db.clone());
        let director =
            catalog.create_director(NewNamed { id: None, name: "Kubrick".into() }).await.unwrap();
        let movie = catalog.create_movie(new_movie("a", Some(director.id), None)).await.unwrap();

        let related = movie.find_related(director::Entity).one(&db).await.unwrap();
        assert_eq!(related, Some(director.clone()));

        catalog.delete_director(director.id).await.unwrap();

        let movie = catalog.get_movie(movie.id).await.unwrap();
        assert_eq!(movie.director_id, Some(director.id));
        let related = movie.find_related(director::Entity).one(&db).await.unwrap();
        assert_eq!(related, None);
    }
}
