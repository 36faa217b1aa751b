use maud::{DOCTYPE, Markup, html};

use crate::{
    models::{
        CastMember, FlashCategory, MAX_SEARCH_PAGE, MediaSummary, MovieDetail, Trailer, TvDetail,
    },
    session::PageContext,
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";
const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

pub fn index_page(ctx: &PageContext, movies: &[MediaSummary], tv_shows: &[MediaSummary]) -> String {
    page(
        "Reelview",
        ctx,
        html! {
            section {
                h2 class="text-2xl font-bold text-gray-900" { "Popular movies" }
                (summary_grid(movies, "Nothing to show right now."))
            }
            section class="mt-12" {
                h2 class="text-2xl font-bold text-gray-900" { "Popular TV shows" }
                (summary_grid(tv_shows, "Nothing to show right now."))
            }
        },
    )
}

pub fn search_page(ctx: &PageContext, query: &str, page_number: u32, movies: &[MediaSummary]) -> String {
    let title = if query.is_empty() { "Search".to_string() } else { format!("Search: {query}") };

    page(
        &title,
        ctx,
        html! {
            form class="flex gap-2" method="get" action="/search" {
                input class="flex-1 rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none" type="search" name="q" value=(query) placeholder="Search movies";
                button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Search" }
            }
            @if !query.is_empty() {
                h1 class="mt-8 text-2xl font-bold text-gray-900" { "Results for \u{201c}" (query) "\u{201d}" }
                (summary_grid(movies, "No movies matched your search."))
                @if !movies.is_empty() {
                    div class="mt-8 flex justify-between text-sm" {
                        @if page_number > 1 {
                            a class="text-blue-600 hover:text-blue-800" href=(search_href(query, page_number - 1)) { "Previous" }
                        } @else {
                            span {}
                        }
                        @if page_number < MAX_SEARCH_PAGE {
                            a class="text-blue-600 hover:text-blue-800" href=(search_href(query, page_number.saturating_add(1))) { "Next" }
                        }
                    }
                }
            }
        },
    )
}

pub fn movie_page(ctx: &PageContext, movie: &MovieDetail) -> String {
    page(
        &movie.title,
        ctx,
        html! {
            div class="md:flex gap-8" {
                (poster(movie.poster_path.as_deref(), &movie.title))
                div class="mt-6 md:mt-0 flex-1" {
                    h1 class="text-3xl font-bold text-gray-900" {
                        (movie.title)
                        @if let Some(year) = year_of(movie.release_date.as_deref()) {
                            span class="ml-2 font-normal text-gray-500" { "(" (year) ")" }
                        }
                    }
                    @if let Some(tagline) = &movie.tagline {
                        p class="mt-1 italic text-gray-500" { (tagline) }
                    }
                    p class="mt-3 text-sm text-gray-600" {
                        (rating(movie.rating))
                        @if let Some(runtime) = movie.runtime {
                            " · " (runtime / 60) "h " (runtime % 60) "m"
                        }
                        @if let Some(date) = &movie.release_date {
                            " · " (date)
                        }
                    }
                    (genre_chips(&movie.genres))
                    p class="mt-6 text-gray-700" { (movie.overview) }
                }
            }
            @if let Some(trailer) = &movie.trailer {
                (trailer_block(trailer))
            }
            @if !movie.cast.is_empty() {
                section class="mt-10" {
                    h2 class="text-xl font-semibold text-gray-900" { "Cast" }
                    div class="mt-4 grid grid-cols-2 gap-4 sm:grid-cols-5" {
                        @for member in &movie.cast {
                            (cast_card(member))
                        }
                    }
                }
            }
        },
    )
}

pub fn tv_page(ctx: &PageContext, show: &TvDetail) -> String {
    page(
        &show.name,
        ctx,
        html! {
            div class="md:flex gap-8" {
                (poster(show.poster_path.as_deref(), &show.name))
                div class="mt-6 md:mt-0 flex-1" {
                    h1 class="text-3xl font-bold text-gray-900" {
                        (show.name)
                        @if let Some(year) = year_of(show.first_air_date.as_deref()) {
                            span class="ml-2 font-normal text-gray-500" { "(" (year) ")" }
                        }
                    }
                    @if let Some(tagline) = &show.tagline {
                        p class="mt-1 italic text-gray-500" { (tagline) }
                    }
                    p class="mt-3 text-sm text-gray-600" {
                        (rating(show.rating))
                        @if let Some(seasons) = show.seasons {
                            " · " (seasons) (if seasons == 1 { " season" } else { " seasons" })
                        }
                        @if let Some(episodes) = show.episodes {
                            " · " (episodes) " episodes"
                        }
                    }
                    (genre_chips(&show.genres))
                    p class="mt-6 text-gray-700" { (show.overview) }
                }
            }
            @if let Some(trailer) = &show.trailer {
                (trailer_block(trailer))
            }
        },
    )
}

pub fn login_page(ctx: &PageContext, username: &str) -> String {
    page(
        "Log in",
        ctx,
        html! {
            div class="max-w-md mx-auto bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { "Log in" }
                form class="mt-6 space-y-4" method="post" action="/login" {
                    (text_field("username", "Username", "text", username))
                    (text_field("password", "Password", "password", ""))
                    button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Log in" }
                }
                p class="mt-4 text-sm text-gray-600" {
                    "No account yet? " a class="text-blue-600 hover:text-blue-800" href="/register" { "Register" }
                }
            }
        },
    )
}

pub fn register_page(ctx: &PageContext, username: &str, email: &str) -> String {
    page(
        "Register",
        ctx,
        html! {
            div class="max-w-md mx-auto bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { "Create an account" }
                form class="mt-6 space-y-4" method="post" action="/register" {
                    (text_field("username", "Username", "text", username))
                    (text_field("email", "Email", "email", email))
                    (text_field("password", "Password", "password", ""))
                    button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Register" }
                }
                p class="mt-4 text-sm text-gray-600" {
                    "Already registered? " a class="text-blue-600 hover:text-blue-800" href="/login" { "Log in" }
                }
            }
        },
    )
}

pub fn error_page(message: &str) -> String {
    page(
        "Error",
        &PageContext::default(),
        html! {
            div class="max-w-xl mx-auto bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { "Error" }
                p class="mt-4 text-gray-700" { (message) }
                a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
            }
        },
    )
}

fn page(title: &str, ctx: &PageContext, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " · Reelview" }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" {
                (nav(ctx))
                main class="max-w-6xl mx-auto px-6 py-10" {
                    (flashes(ctx))
                    (body)
                }
            }
        }
    }
    .into_string()
}

fn nav(ctx: &PageContext) -> Markup {
    html! {
        nav class="bg-gray-900 text-white" {
            div class="max-w-6xl mx-auto px-6 py-4 flex items-center gap-6" {
                a class="text-xl font-bold" href="/" { "Reelview" }
                form class="flex-1" method="get" action="/search" {
                    input class="w-full max-w-sm rounded-md bg-gray-800 px-3 py-1.5 text-sm placeholder-gray-400 focus:outline-none" type="search" name="q" placeholder="Search movies";
                }
                @if let Some(user) = &ctx.user {
                    span class="text-sm text-gray-300" { "Signed in as " strong { (user.username) } }
                    a class="text-sm hover:text-gray-300" href="/logout" { "Logout" }
                } @else {
                    a class="text-sm hover:text-gray-300" href="/login" { "Login" }
                    a class="text-sm hover:text-gray-300" href="/register" { "Register" }
                }
            }
        }
    }
}

fn flashes(ctx: &PageContext) -> Markup {
    html! {
        @for flash in &ctx.flashes {
            @let style = match flash.category {
                FlashCategory::Success => "border-green-500 bg-green-50 text-green-800",
                FlashCategory::Info => "border-blue-500 bg-blue-50 text-blue-800",
                FlashCategory::Error => "border-red-500 bg-red-50 text-red-800",
            };
            div class=(format!("mb-6 border-l-4 px-4 py-3 {style}")) role="alert" { (flash.message) }
        }
    }
}

fn summary_grid(items: &[MediaSummary], empty_message: &str) -> Markup {
    html! {
        @if items.is_empty() {
            p class="mt-4 text-gray-500" { (empty_message) }
        } @else {
            div class="mt-4 grid grid-cols-2 gap-6 sm:grid-cols-3 lg:grid-cols-5" {
                @for item in items {
                    a class="block bg-white shadow rounded-lg overflow-hidden hover:shadow-lg" href=(item.href()) {
                        @if let Some(path) = &item.poster_path {
                            img class="w-full aspect-[2/3] object-cover" src=(image_url("w342", path)) alt=(item.title) loading="lazy";
                        } @else {
                            div class="w-full aspect-[2/3] bg-gray-200" {}
                        }
                        div class="p-3" {
                            h3 class="font-semibold text-gray-900 truncate" { (item.title) }
                            p class="text-xs text-gray-500" {
                                (rating(item.rating))
                                @if let Some(year) = year_of(item.release_date.as_deref()) {
                                    " · " (year)
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn poster(path: Option<&str>, alt: &str) -> Markup {
    html! {
        @if let Some(path) = path {
            img class="w-64 rounded-lg shadow" src=(image_url("w500", path)) alt=(alt);
        }
    }
}

fn genre_chips(genres: &[String]) -> Markup {
    html! {
        @if !genres.is_empty() {
            div class="mt-4 flex flex-wrap gap-2" {
                @for genre in genres {
                    span class="rounded-full bg-gray-200 px-3 py-1 text-xs text-gray-700" { (genre) }
                }
            }
        }
    }
}

fn trailer_block(trailer: &Trailer) -> Markup {
    html! {
        section class="mt-10" {
            h2 class="text-xl font-semibold text-gray-900" { "Trailer" }
            @if let Some(url) = trailer.embed_url() {
                div class="mt-4 aspect-video" {
                    iframe class="w-full h-full rounded-lg" src=(url) title=(trailer.name) allowfullscreen {}
                }
            } @else {
                p class="mt-4 text-gray-600" { (trailer.name) " (" (trailer.site) ")" }
            }
        }
    }
}

fn cast_card(member: &CastMember) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg overflow-hidden" {
            @if let Some(path) = &member.profile_path {
                img class="w-full aspect-[2/3] object-cover" src=(image_url("w185", path)) alt=(member.name) loading="lazy";
            } @else {
                div class="w-full aspect-[2/3] bg-gray-200" {}
            }
            div class="p-2" {
                p class="text-sm font-semibold text-gray-900" { (member.name) }
                p class="text-xs text-gray-500" { (member.character) }
            }
        }
    }
}

fn text_field(name: &str, label: &str, kind: &str, value: &str) -> Markup {
    html! {
        div {
            label class="block text-sm font-medium text-gray-700" for=(name) { (label) }
            input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" type=(kind) name=(name) id=(name) value=(value) required;
        }
    }
}

fn image_url(size: &str, path: &str) -> String {
    format!("{IMAGE_BASE}/{size}{path}")
}

fn search_href(query: &str, page_number: u32) -> String {
    format!("/search?q={}&page={}", urlencoding::encode(query), page_number)
}

fn rating(value: f64) -> String {
    format!("\u{2605} {value:.1}")
}

fn year_of(date: Option<&str>) -> Option<&str> {
    date.and_then(|d| d.get(..4))
}
