use chrono::NaiveDate;
use filmorate::domain_model::*;
use filmorate::server::Server;

fn film(name: &str) -> FilmDraft {
    FilmDraft {
        name: name.to_string(),
        description: format!("{name} description"),
        release_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        duration: 100,
        mpa: None,
        genres: vec![],
    }
}

fn user(login: &str) -> UserDraft {
    UserDraft {
        email: format!("{login}@example.com"),
        login: login.to_string(),
        name: login.to_uppercase(),
        birthday: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
    }
}

async fn users(server: &Server, n: usize) -> Vec<UserId> {
    let mut ids = Vec::new();
    for i in 0..n {
        let u = server.user_service.create_user(user(&format!("u{i}"))).await.unwrap();
        ids.push(u.id);
    }
    ids
}

#[tokio::test]
async fn created_film_without_links_has_empty_sets() {
    let server = Server::in_memory();

    let created = server.film_service.create_film(film("Plain")).await.unwrap();

    assert!(created.mpa.is_none());
    assert!(created.genres.is_empty());
    assert!(created.likes.is_empty());
    let fetched = server.film_service.get_film_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn created_film_resolves_rating_and_sorted_genres() {
    let server = Server::in_memory();
    let mut draft = film("Linked");
    draft.mpa = Some(MpaId(3));
    draft.genres = vec![GenreId(4), GenreId(1), GenreId(4)];

    let created = server.film_service.create_film(draft).await.unwrap();

    let mpa = created.mpa.as_ref().unwrap();
    assert_eq!(mpa.id, MpaId(3));
    assert_eq!(mpa.name, "PG-13");
    assert_eq!(created.genre_ids(), vec![GenreId(1), GenreId(4)]);
    assert_eq!(created.genres[0].name, "Comedy");
}

#[tokio::test]
async fn unknown_rating_rejects_create_without_side_effects() {
    let server = Server::in_memory();
    let mut draft = film("Orphan");
    draft.mpa = Some(MpaId(999));

    let err = server.film_service.create_film(draft).await.unwrap_err();

    assert!(err.is_not_found());
    assert!(server.film_service.get_all_films().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_genre_rejects_create_without_side_effects() {
    let server = Server::in_memory();
    let mut draft = film("Orphan");
    draft.genres = vec![GenreId(1), GenreId(42)];

    let err = server.film_service.create_film(draft).await.unwrap_err();

    assert!(err.is_not_found());
    assert!(server.film_service.get_all_films().await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_draft_is_bad_request() {
    let server = Server::in_memory();

    let mut blank = film("x");
    blank.name = "  ".to_string();
    let mut early = film("Early");
    early.release_date = NaiveDate::from_ymd_opt(1895, 12, 27).unwrap();
    let mut long = film("Long");
    long.description = "a".repeat(MAX_DESCRIPTION_LENGTH + 1);
    let mut short = film("Short");
    short.duration = 0;

    for draft in [blank, early, long, short] {
        let err = server.film_service.create_film(draft).await.unwrap_err();
        assert!(err.is_bad_request(), "{err:?}");
    }
    assert!(server.film_service.get_all_films().await.unwrap().is_empty());
}

#[tokio::test]
async fn first_screening_date_is_accepted() {
    let server = Server::in_memory();
    let mut draft = film("Arrival of a Train");
    draft.release_date = earliest_release_date();

    assert!(server.film_service.create_film(draft).await.is_ok());
}

#[tokio::test]
async fn update_replaces_fields_and_genres() {
    let server = Server::in_memory();
    let mut draft = film("Before");
    draft.mpa = Some(MpaId(1));
    draft.genres = vec![GenreId(2), GenreId(3)];
    let created = server.film_service.create_film(draft).await.unwrap();

    let mut changed = film("After");
    changed.duration = 90;
    changed.mpa = Some(MpaId(5));
    changed.genres = vec![GenreId(6)];
    let updated = server
        .film_service
        .update_film(created.id, changed)
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "After");
    assert_eq!(updated.duration, 90);
    assert_eq!(updated.mpa_id(), Some(MpaId(5)));
    assert_eq!(updated.genre_ids(), vec![GenreId(6)]);
}

#[tokio::test]
async fn update_with_no_genres_clears_them() {
    let server = Server::in_memory();
    let mut draft = film("Genred");
    draft.genres = vec![GenreId(1), GenreId(2)];
    let created = server.film_service.create_film(draft).await.unwrap();

    let updated = server
        .film_service
        .update_film(created.id, film("Genred"))
        .await
        .unwrap();

    assert!(updated.genres.is_empty());
    assert!(updated.mpa.is_none());
}

#[tokio::test]
async fn update_keeps_likes() {
    let server = Server::in_memory();
    let ids = users(&server, 1).await;
    let created = server.film_service.create_film(film("Liked")).await.unwrap();
    server.film_service.add_like(created.id, ids[0]).await.unwrap();

    let updated = server
        .film_service
        .update_film(created.id, film("Still liked"))
        .await
        .unwrap();

    assert!(updated.likes.contains(&ids[0]));
}

#[tokio::test]
async fn update_of_missing_film_is_not_found() {
    let server = Server::in_memory();
    server.film_service.create_film(film("Only")).await.unwrap();

    let err = server
        .film_service
        .update_film(FilmId(999), film("Ghost"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    let all = server.film_service.get_all_films().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Only");
}

#[tokio::test]
async fn update_with_unknown_rating_leaves_film_unchanged() {
    let server = Server::in_memory();
    let created = server.film_service.create_film(film("Stable")).await.unwrap();
    let mut changed = film("Changed");
    changed.mpa = Some(MpaId(77));

    let err = server
        .film_service
        .update_film(created.id, changed)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    let fetched = server.film_service.get_film_by_id(created.id).await.unwrap();
    assert_eq!(fetched.name, "Stable");
}

#[tokio::test]
async fn like_is_idempotent_and_unlike_of_absent_like_is_noop() {
    let server = Server::in_memory();
    let ids = users(&server, 2).await;
    let f = server.film_service.create_film(film("Liked")).await.unwrap();

    server.film_service.add_like(f.id, ids[0]).await.unwrap();
    server.film_service.add_like(f.id, ids[0]).await.unwrap();
    server.film_service.remove_like(f.id, ids[1]).await.unwrap();

    let fetched = server.film_service.get_film_by_id(f.id).await.unwrap();
    assert_eq!(fetched.like_count(), 1);

    server.film_service.remove_like(f.id, ids[0]).await.unwrap();
    let fetched = server.film_service.get_film_by_id(f.id).await.unwrap();
    assert_eq!(fetched.like_count(), 0);
}

#[tokio::test]
async fn like_reports_missing_film_and_user_distinctly() {
    let server = Server::in_memory();
    let ids = users(&server, 1).await;
    let f = server.film_service.create_film(film("Real")).await.unwrap();

    let missing_film = server
        .film_service
        .add_like(FilmId(999), ids[0])
        .await
        .unwrap_err();
    let missing_user = server
        .film_service
        .add_like(f.id, UserId(999))
        .await
        .unwrap_err();

    assert!(missing_film.is_not_found());
    assert!(missing_user.is_not_found());
    assert!(missing_film.to_string().contains("film"));
    assert!(missing_user.to_string().contains("user"));
    assert_ne!(missing_film.to_string(), missing_user.to_string());

    let err = server
        .film_service
        .remove_like(f.id, UserId(999))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn top_films_rank_by_likes_then_id() {
    let server = Server::in_memory();
    let ids = users(&server, 3).await;
    let mut films = Vec::new();
    for name in ["A", "B", "C", "D"] {
        films.push(server.film_service.create_film(film(name)).await.unwrap().id);
    }
    // B: 3 likes, D: 2 likes, A and C: none
    for u in &ids {
        server.film_service.add_like(films[1], *u).await.unwrap();
    }
    server.film_service.add_like(films[3], ids[0]).await.unwrap();
    server.film_service.add_like(films[3], ids[1]).await.unwrap();

    let top: Vec<FilmId> = server
        .film_service
        .get_top_films(Some(3))
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.id)
        .collect();

    assert_eq!(top, vec![films[1], films[3], films[0]]);
}

#[tokio::test]
async fn top_films_count_edge_cases() {
    let server = Server::in_memory();
    for i in 0..12 {
        server
            .film_service
            .create_film(film(&format!("F{i}")))
            .await
            .unwrap();
    }

    assert!(server.film_service.get_top_films(Some(0)).await.unwrap().is_empty());
    assert!(server.film_service.get_top_films(Some(-5)).await.unwrap().is_empty());
    assert_eq!(
        server.film_service.get_top_films(None).await.unwrap().len(),
        DEFAULT_TOP_COUNT as usize
    );
    assert_eq!(server.film_service.get_top_films(Some(100)).await.unwrap().len(), 12);
}

#[tokio::test]
async fn missing_film_lookup_is_not_found() {
    let server = Server::in_memory();

    let err = server.film_service.get_film_by_id(FilmId(1)).await.unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn unlike_reports_missing_film_before_missing_user() {
    let server = Server::in_memory();
    let ids = users(&server, 1).await;

    let err = server
        .film_service
        .remove_like(FilmId(999), ids[0])
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("film"));

    let err = server
        .film_service
        .remove_like(FilmId(999), UserId(999))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("film"));
}
