use filmorate::domain_model::*;
use filmorate::server::Server;

#[tokio::test]
async fn standard_ratings_are_listed_by_id() {
    let server = Server::in_memory();

    let ratings = server.lookup_service.list_mpa().await.unwrap();

    let names: Vec<&str> = ratings.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["G", "PG", "PG-13", "R", "NC-17"]);
}

#[tokio::test]
async fn standard_genres_are_listed_by_id() {
    let server = Server::in_memory();

    let genres = server.lookup_service.list_genres().await.unwrap();

    assert_eq!(genres.len(), 6);
    assert!(genres.windows(2).all(|w| w[0].id < w[1].id));
    assert_eq!(genres[0].name, "Comedy");
}

#[tokio::test]
async fn lookups_by_id() {
    let server = Server::in_memory();

    assert_eq!(
        server.lookup_service.get_genre_by_id(GenreId(2)).await.unwrap().name,
        "Drama"
    );
    assert_eq!(
        server.lookup_service.get_mpa_by_id(MpaId(4)).await.unwrap().name,
        "R"
    );
    assert!(
        server
            .lookup_service
            .get_genre_by_id(GenreId(99))
            .await
            .unwrap_err()
            .is_not_found()
    );
    assert!(
        server
            .lookup_service
            .get_mpa_by_id(MpaId(0))
            .await
            .unwrap_err()
            .is_not_found()
    );
}
