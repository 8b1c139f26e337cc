use ::scraper::{ElementRef, Selector};
use tracing::{debug, instrument};

use crate::error::{KboError, Result};
use crate::kbo_scraper;
use crate::model::{DateToken, GameResult, ScheduleEntry, Team};

pub(crate) fn schedule_url(base_url: &str, team: Team, token: &DateToken) -> String {
    format!(
        "{base_url}/team/schedule?category=kbo&teamCode={}&date={token}",
        team.code()
    )
}

#[instrument(skip(client))]
pub(crate) async fn get_schedule(
    client: &reqwest::Client,
    base_url: &str,
    team: Team,
    token: &DateToken,
) -> Result<Vec<ScheduleEntry>> {
    let url = schedule_url(base_url, team, token);
    let document = kbo_scraper::get_document(client, &url).await?;
    let entries = parse_schedule(&document)?;
    debug!(count = entries.len(), %team, %token, "parsed schedule page");
    Ok(entries)
}

pub(crate) fn parse_schedule(document: &kbo_scraper::Html) -> Result<Vec<ScheduleEntry>> {
    let list_selector = Selector::parse("article#dataList")?;
    let list = document
        .select(&list_selector)
        .next()
        .ok_or(KboError::ElementNotFound {
            context: "schedule data list",
        })?;

    let result_selector = Selector::parse("a > div:nth-of-type(2) > p:nth-of-type(1) > span")?;
    Ok(list
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "article")
        .filter_map(|article| parse_entry(&article, &result_selector))
        .collect())
}

// Articles without a link (ads, separators) carry no game.
fn parse_entry(article: &ElementRef, result_selector: &Selector) -> Option<ScheduleEntry> {
    let link = article
        .children()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "a")?;
    let href = link.value().attr("href")?;
    let game_id = href.trim_end_matches('/').rsplit('/').next()?.to_string();

    let result = article
        .select(result_selector)
        .next()
        .and_then(|span| span.value().classes().find_map(|c| c.parse::<GameResult>().ok()));

    Some(ScheduleEntry { game_id, result })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kbo_scraper::BASE_URL;

    fn game(game_id: &str, marker: Option<&str>) -> String {
        let span = match marker {
            Some(class) => format!(r#"<span class="{class}">결과</span>"#),
            None => "<span>18:30</span>".to_string(),
        };
        format!(
            r#"<article><a href="/game/{game_id}"><div>홈</div><div><p>{span}</p><p>vs</p></div></a></article>"#
        )
    }

    fn page(articles: &[String]) -> kbo_scraper::Html {
        kbo_scraper::Html::parse_document(&format!(
            r#"<html><body><article id="dataList">{}</article></body></html>"#,
            articles.concat()
        ))
    }

    #[test]
    fn test_parse_schedule_entries_in_page_order() {
        let document = page(&[
            game("20240323HHLG02024", Some("w")),
            "<article><div>광고</div></article>".to_string(),
            game("20240324HHLG02024", Some("l")),
            game("20240326LGKT02024", Some("c")),
            game("20240327LGKT02024", None),
        ]);

        let entries = parse_schedule(&document).unwrap();
        let ids: Vec<_> = entries.iter().map(|e| e.game_id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "20240323HHLG02024",
                "20240324HHLG02024",
                "20240326LGKT02024",
                "20240327LGKT02024"
            ]
        );
        assert_eq!(entries[0].result, Some(GameResult::Win));
        assert_eq!(entries[1].result, Some(GameResult::Loss));
        assert_eq!(entries[2].result, Some(GameResult::Cancelled));
        assert_eq!(entries[3].result, None);
    }

    #[test]
    fn test_unknown_marker_class_is_unplayed() {
        let document = page(&[game("20240323HHLG02024", Some("live"))]);
        let entries = parse_schedule(&document).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].result, None);
    }

    #[test]
    fn test_missing_data_list_is_an_error() {
        let document = kbo_scraper::Html::parse_document("<html><body></body></html>");
        let err = parse_schedule(&document).unwrap_err();
        assert!(matches!(err, KboError::ElementNotFound { .. }));
    }

    #[test]
    fn test_schedule_url() {
        let url = schedule_url(BASE_URL, Team::Doosan, &DateToken::Year(2024));
        assert_eq!(
            url,
            "https://m.sports.naver.com/team/schedule?category=kbo&teamCode=OB&date=2024"
        );
    }

    #[tokio::test]
    #[ignore = "hits m.sports.naver.com"]
    async fn test_get_schedule_live() {
        let client = reqwest::Client::new();
        let entries = get_schedule(&client, BASE_URL, Team::Lg, &DateToken::Year(2024))
            .await
            .unwrap();

        assert!(!entries.is_empty());
        assert!(entries[0].date().is_some());
    }
}
