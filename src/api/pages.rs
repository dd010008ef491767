//! HTML pages.

use crate::{
    types::{MigrationResult, PlaylistSummary, Provider, TrackOutcome},
    utils::escape_html,
};

const TITLE: &str = "Jam Jump";

fn layout(heading: &str, body: &str) -> String {
    format!(
        "<!doctype html>\
         <html><head><meta charset=\"utf-8\"><title>{title}</title></head>\
         <body><h1>{heading}</h1>{body}<hr><p><a href=\"/\">Home</a></p></body></html>",
        title = TITLE,
        heading = escape_html(heading),
        body = body,
    )
}

fn connection_status(provider: Provider, connected: bool) -> String {
    if connected {
        format!(
            "<p style=\"color:green\">{} connected!</p>",
            provider.display_name()
        )
    } else {
        format!(
            "<p><a href=\"{}\">Login to {}</a></p>",
            provider.login_path(),
            provider.display_name()
        )
    }
}

pub fn index(source_connected: bool, destination_connected: bool) -> String {
    let mut body = String::new();
    body.push_str(&connection_status(Provider::Source, source_connected));
    body.push_str(&connection_status(Provider::Destination, destination_connected));
    body.push_str("<hr>");

    if source_connected && destination_connected {
        body.push_str("<h3>Ready to go!</h3>");
        body.push_str("<p><a href=\"/source/playlists\">View my playlists</a></p>");
    } else {
        body.push_str("<p>Please connect both services to start migrating.</p>");
    }

    if source_connected || destination_connected {
        body.push_str("<p><a href=\"/logout\">Disconnect</a></p>");
    }

    layout(TITLE, &body)
}

pub fn playlists(playlists: &[PlaylistSummary]) -> String {
    if playlists.is_empty() {
        return layout("My playlists", "<p>No playlists found on Spotify.</p>");
    }

    let mut body = String::from("<table><tr><th>Playlist</th><th>Tracks</th><th></th></tr>");
    for playlist in playlists {
        let name = escape_html(&playlist.name);
        body.push_str(&format!(
            "<tr><td>{name}</td><td>{count}</td><td>\
             <form method=\"post\" action=\"/destination/migrate\">\
             <input type=\"hidden\" name=\"source_playlist_id\" value=\"{id}\">\
             <input type=\"text\" name=\"playlist_name\" value=\"{name}\" required>\
             <button type=\"submit\">Migrate to YouTube</button>\
             </form></td></tr>",
            name = name,
            count = playlist.track_count,
            id = escape_html(&playlist.id),
        ));
    }
    body.push_str("</table>");

    layout("My playlists", &body)
}

pub fn migration_result(result: &MigrationResult) -> String {
    let mut body = format!(
        "<p>Successfully moved {} of {} songs to YouTube.</p>\
         <p><a href=\"https://www.youtube.com/playlist?list={id}\">Open the new playlist</a></p>",
        result.success_count,
        result.attempted_count,
        id = escape_html(&result.created_playlist_id),
    );

    if !result.outcomes.is_empty() {
        body.push_str("<table><tr><th>Track</th><th>Result</th><th>Details</th></tr>");
        for report in &result.outcomes {
            let details = match &report.outcome {
                TrackOutcome::Matched { item_id } => escape_html(item_id),
                TrackOutcome::Unmatched => escape_html(report.query.as_str()),
                TrackOutcome::SearchFailed { reason } | TrackOutcome::AddFailed { reason } => {
                    escape_html(reason)
                }
            };
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&report.track.to_string()),
                report.outcome.label(),
                details
            ));
        }
        body.push_str("</table>");
    }

    layout("Migration complete!", &body)
}

pub fn error(heading: &str, message: &str) -> String {
    layout(heading, &format!("<pre>{}</pre>", escape_html(message)))
}
