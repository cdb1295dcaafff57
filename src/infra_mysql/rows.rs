//! Flat join rows and the folds that rebuild aggregates from them.
//!
//! A film joined against its genre and like links yields one row per
//! (genre, like) pair, or a single row of NULLs when it has neither. Rows are
//! grouped by the owning id in first-seen order: the first row supplies the
//! scalar fields, every row may add to the nested collections.

use crate::domain_model::*;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FilmJoinRow {
    pub id: FilmId,
    pub name: String,
    pub description: Option<String>,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub mpa_id: Option<MpaId>,
    pub mpa_name: Option<String>,
    pub mpa_description: Option<String>,
    pub genre_id: Option<GenreId>,
    pub genre_name: Option<String>,
    pub genre_description: Option<String>,
    pub like_user_id: Option<UserId>,
}

#[derive(Debug, Default)]
pub struct FilmAssembler {
    films: Vec<Film>,
    index: HashMap<FilmId, usize>,
}

impl FilmAssembler {
    pub fn push(&mut self, row: FilmJoinRow) {
        let slot = match self.index.get(&row.id) {
            Some(&slot) => slot,
            None => {
                let mpa = row.mpa_id.map(|id| Mpa {
                    id,
                    name: row.mpa_name.clone().unwrap_or_default(),
                    description: row.mpa_description.clone(),
                });
                self.films.push(Film {
                    id: row.id,
                    name: row.name,
                    description: row.description.unwrap_or_default(),
                    release_date: row.release_date,
                    duration: row.duration,
                    mpa,
                    genres: Vec::new(),
                    likes: HashSet::new(),
                });
                self.index.insert(row.id, self.films.len() - 1);
                self.films.len() - 1
            }
        };

        let film = &mut self.films[slot];
        if let Some(genre_id) = row.genre_id {
            film.push_genre(Genre {
                id: genre_id,
                name: row.genre_name.unwrap_or_default(),
                description: row.genre_description,
            });
        }
        if let Some(user_id) = row.like_user_id {
            film.likes.insert(user_id);
        }
    }

    /// Films in first-seen order, each with genres ascending by id.
    pub fn finish(self) -> Vec<Film> {
        let mut films = self.films;
        for film in &mut films {
            film.genres.sort_by_key(|g| g.id);
        }
        films
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserJoinRow {
    pub id: UserId,
    pub email: String,
    pub login: String,
    pub name: Option<String>,
    pub birthday: NaiveDate,
    pub friend_id: Option<UserId>,
}

#[derive(Debug, Default)]
pub struct UserAssembler {
    users: Vec<User>,
    index: HashMap<UserId, usize>,
}

impl UserAssembler {
    pub fn push(&mut self, row: UserJoinRow) {
        let slot = match self.index.get(&row.id) {
            Some(&slot) => slot,
            None => {
                self.users.push(User {
                    id: row.id,
                    email: row.email,
                    login: row.login,
                    name: row.name.unwrap_or_default(),
                    birthday: row.birthday,
                    friends: HashSet::new(),
                });
                self.index.insert(row.id, self.users.len() - 1);
                self.users.len() - 1
            }
        };

        if let Some(friend_id) = row.friend_id {
            self.users[slot].friends.insert(friend_id);
        }
    }

    pub fn finish(self) -> Vec<User> {
        self.users
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn film_row(id: i64) -> FilmJoinRow {
        FilmJoinRow {
            id: FilmId(id),
            name: format!("film {id}"),
            description: None,
            release_date: NaiveDate::from_ymd_opt(2001, 9, 1).unwrap(),
            duration: 100,
            mpa_id: None,
            mpa_name: None,
            mpa_description: None,
            genre_id: None,
            genre_name: None,
            genre_description: None,
            like_user_id: None,
        }
    }

    fn with_link(id: i64, genre: Option<i64>, like: Option<i64>) -> FilmJoinRow {
        FilmJoinRow {
            genre_id: genre.map(GenreId),
            genre_name: genre.map(|g| format!("genre {g}")),
            like_user_id: like.map(UserId),
            ..film_row(id)
        }
    }

    #[test]
    fn film_without_links_still_appears() {
        let mut assembler = FilmAssembler::default();
        assembler.push(film_row(1));

        let films = assembler.finish();
        assert_eq!(films.len(), 1);
        assert!(films[0].genres.is_empty());
        assert!(films[0].likes.is_empty());
        assert!(films[0].mpa.is_none());
        assert_eq!(films[0].description, "");
    }

    #[test]
    fn cartesian_rows_collapse_into_one_aggregate() {
        let mut assembler = FilmAssembler::default();
        // 2 genres x 2 likes
        for (genre, like) in [(2, 10), (2, 11), (1, 10), (1, 11)] {
            assembler.push(with_link(7, Some(genre), Some(like)));
        }

        let films = assembler.finish();
        assert_eq!(films.len(), 1);
        let film = &films[0];
        assert_eq!(film.genre_ids(), vec![GenreId(1), GenreId(2)]);
        assert_eq!(film.like_count(), 2);
        assert!(film.likes.contains(&UserId(10)) && film.likes.contains(&UserId(11)));
    }

    #[test]
    fn first_seen_order_is_preserved_across_films() {
        let mut assembler = FilmAssembler::default();
        assembler.push(with_link(3, None, Some(1)));
        assembler.push(with_link(3, None, Some(2)));
        assembler.push(with_link(1, Some(4), None));
        assembler.push(with_link(2, None, None));

        let ids: Vec<FilmId> = assembler.finish().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![FilmId(3), FilmId(1), FilmId(2)]);
    }

    #[test]
    fn first_row_scalars_win() {
        let mut assembler = FilmAssembler::default();
        let mut first = with_link(5, Some(1), None);
        first.mpa_id = Some(MpaId(2));
        first.mpa_name = Some("PG".to_string());
        assembler.push(first);
        assembler.push(FilmJoinRow {
            name: "ignored".to_string(),
            ..with_link(5, Some(3), None)
        });

        let films = assembler.finish();
        assert_eq!(films[0].name, "film 5");
        assert_eq!(films[0].mpa.as_ref().map(|m| m.name.as_str()), Some("PG"));
        assert_eq!(films[0].genres.len(), 2);
    }

    #[test]
    fn users_group_friend_ids() {
        let row = |id: i64, friend: Option<i64>| UserJoinRow {
            id: UserId(id),
            email: format!("u{id}@example.com"),
            login: format!("u{id}"),
            name: None,
            birthday: NaiveDate::from_ymd_opt(1999, 1, 1).unwrap(),
            friend_id: friend.map(UserId),
        };

        let mut assembler = UserAssembler::default();
        assembler.push(row(1, Some(2)));
        assembler.push(row(1, Some(3)));
        assembler.push(row(2, None));

        let users = assembler.finish();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].friends.len(), 2);
        assert!(users[1].friends.is_empty());
        assert_eq!(users[1].name, "");
    }
}
