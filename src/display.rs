use crate::favorites::{FavoriteChange, FavoriteSet, FavoritesListener};
use crate::models::{Catalog, Song};
use crate::playlist::Selection;

const FILLED_HEART: &str = "♥";
const EMPTY_HEART: &str = "♡";

/// Favorite indicator for one song
pub fn heart(is_favorite: bool) -> &'static str {
    if is_favorite { FILLED_HEART } else { EMPTY_HEART }
}

fn render_song_line(song: &Song, favorites: &FavoriteSet) -> String {
    format!(
        "{} #{} {} ({})\n     {}",
        heart(favorites.contains(&song.id)),
        song.id,
        song.title,
        song.duration,
        song.link
    )
}

pub fn render_selection(selection: &Selection<'_>, favorites: &FavoriteSet) -> String {
    let mut out = String::new();
    for (i, song) in selection.songs.iter().enumerate() {
        out.push_str(&format!("{:>2}. {}\n", i + 1, render_song_line(song, favorites)));
    }
    out.push_str(&format!(
        "{} songs, total time: {}",
        selection.len(),
        selection.total_time()
    ));
    out
}

/// Favorites panel. Ids no longer in the catalog are skipped.
pub fn render_favorites(catalog: &Catalog, favorites: &FavoriteSet) -> String {
    let mut out = format!("Favorites ({})\n", favorites.len());
    if favorites.is_empty() {
        out.push_str("No favorite songs yet. Use `toggle <ID>` to add a song to your favorites.");
        return out;
    }

    let lines: Vec<String> = favorites
        .iter()
        .filter_map(|id| catalog.find(id))
        .map(|song| format!("  #{} {} ({})\n     {}", song.id, song.title, song.duration, song.link))
        .collect();
    out.push_str(&lines.join("\n"));
    out
}

/// Full catalog with favorite indicators
pub fn render_catalog(catalog: &Catalog, favorites: &FavoriteSet) -> String {
    catalog
        .songs()
        .iter()
        .map(|song| format!("  {}", render_song_line(song, favorites)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_topics(catalog: &Catalog) -> String {
    catalog
        .topics()
        .iter()
        .map(|topic| {
            let count = catalog.songs().iter().filter(|s| s.topic == *topic).count();
            format!("  {topic} ({count})")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_change(change: &FavoriteChange) -> String {
    let action = if change.is_favorite {
        "added to"
    } else {
        "removed from"
    };
    format!(
        "{} #{} {} favorites ({} total)",
        heart(change.is_favorite),
        change.id,
        action,
        change.count
    )
}

/// Prints the refreshed indicator and count after each favorites mutation
pub struct ConsoleFavoritesView;

impl FavoritesListener for ConsoleFavoritesView {
    fn favorites_changed(&mut self, change: &FavoriteChange, _favorites: &FavoriteSet) {
        println!("{}", render_change(change));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: &str, title: &str, seconds: u32) -> Song {
        Song {
            id: id.to_string(),
            title: title.to_string(),
            link: format!("https://example.org/{id}"),
            duration: crate::playlist::utils::format_seconds(seconds),
            seconds,
            topic: "praise".to_string(),
        }
    }

    #[test]
    fn test_render_selection_marks_favorites_and_total() {
        let songs = vec![song("PL1", "Glory", 100), song("S02", "Grace", 125)];
        let selection = Selection::new(songs.iter().collect());
        let favorites: FavoriteSet = ["S02"].into_iter().collect();

        let out = render_selection(&selection, &favorites);
        assert!(out.contains("♡ #PL1 Glory (1:40)"));
        assert!(out.contains("♥ #S02 Grace (2:05)"));
        assert!(out.ends_with("2 songs, total time: 3:45"));
    }

    #[test]
    fn test_render_favorites_skips_stale_ids() {
        let catalog = Catalog::new(vec![song("S01", "Hope", 90)]);
        let favorites: FavoriteSet = ["GONE", "S01"].into_iter().collect();

        let out = render_favorites(&catalog, &favorites);
        assert!(out.starts_with("Favorites (2)"));
        assert!(out.contains("#S01 Hope"));
        assert!(!out.contains("GONE"));
    }

    #[test]
    fn test_render_favorites_empty() {
        let catalog = Catalog::new(vec![song("S01", "Hope", 90)]);
        let out = render_favorites(&catalog, &FavoriteSet::new());
        assert!(out.starts_with("Favorites (0)"));
        assert!(out.contains("No favorite songs yet"));
    }

    #[test]
    fn test_render_change() {
        let change = FavoriteChange {
            id: "PL1".to_string(),
            is_favorite: true,
            count: 2,
        };
        assert_eq!(
            render_change(&change),
            "♥ #PL1 added to favorites (2 total)"
        );
    }
}
