//! Walks through every catalogue operation against the in-memory backend.
//!
//! $ cargo run --bin catalog_demo

use chrono::NaiveDate;
use filmorate::domain_model::*;
use filmorate::logger::*;
use filmorate::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logger = Logger::new_bootstrap();
    logger.reload_from_config(&LogConfig {
        filter: "filmorate=debug".to_string(),
    })?;

    let server = Server::in_memory();
    let films = &server.film_service;
    let users = &server.user_service;
    let lookups = &server.lookup_service;

    println!("genres: {:?}", lookups.list_genres().await?);
    println!("ratings: {:?}", lookups.list_mpa().await?);
    println!("PG-13: {:?}", lookups.get_mpa_by_id(MpaId(3)).await?);

    let mut user_ids = Vec::new();
    for login in ["alice", "bob", "carol"] {
        let user = users
            .create_user(UserDraft {
                email: format!("{login}@example.com"),
                login: login.to_string(),
                name: String::new(),
                birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default(),
            })
            .await?;
        println!("created user: {} ({})", user.name, user.id);
        user_ids.push(user.id);
    }
    let (alice, bob, carol) = (user_ids[0], user_ids[1], user_ids[2]);

    let mut film_ids = Vec::new();
    for (name, year, mpa, genres) in [
        ("Spirited Away", 2001, 1, vec![3]),
        ("Heat", 1995, 4, vec![6, 2]),
        ("Nanook of the North", 1922, 1, vec![5]),
    ] {
        let film = films
            .create_film(FilmDraft {
                name: name.to_string(),
                description: String::new(),
                release_date: NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default(),
                duration: 120,
                mpa: Some(MpaId(mpa)),
                genres: genres.into_iter().map(GenreId).collect(),
            })
            .await?;
        println!("created film: {:?}", film);
        film_ids.push(film.id);
    }

    films.add_like(film_ids[1], alice).await?;
    films.add_like(film_ids[1], bob).await?;
    films.add_like(film_ids[0], carol).await?;
    films.remove_like(film_ids[2], carol).await?;
    for film in films.get_top_films(None).await? {
        println!("top: {} with {} like(s)", film.name, film.like_count());
    }

    users.add_friend(alice, carol).await?;
    users.add_friend(bob, carol).await?;
    users.add_friend(alice, bob).await?;
    println!("alice's friends: {:?}", users.get_friends(alice).await?);
    println!("bob's friends: {:?}", users.get_friends(bob).await?);
    println!(
        "common friends of alice and bob: {:?}",
        users.get_common_friends(alice, bob).await?
    );
    users.remove_friend(alice, bob).await?;

    match users.add_friend(alice, alice).await {
        Ok(()) => println!("unexpected: self-friendship accepted"),
        Err(e) => println!("self-friendship rejected: {e}"),
    }
    match films.get_film_by_id(FilmId(999)).await {
        Ok(film) => println!("unexpected film: {:?}", film),
        Err(e) => println!("lookup of missing film: {e}"),
    }

    println!("all users: {:?}", users.get_all_users().await?);
    println!("all films: {}", films.get_all_films().await?.len());

    server.shutdown().await;
    Ok(())
}
