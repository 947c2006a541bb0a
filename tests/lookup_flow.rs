use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use kolnet::error::{AppError, Result};
use kolnet::models::{Config, Person, QueryFilter};
use kolnet::output::{OutputFormat, OutputSink};
use kolnet::pipeline::{build_fetcher, prepare_queries, run_dump, run_find};
use kolnet::services::{BatchFetcher, BatchOptions, PersonCache, RecordSource};
use wiremock::matchers::{body_string, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Capture {
    fn sink(&self, format: OutputFormat) -> OutputSink {
        OutputSink::new(Box::new(self.clone()), format)
    }

    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn person(number: u32, fullname: &str, login: &str, block: &str, room: &str) -> Person {
    Person {
        number,
        fullname: fullname.to_string(),
        block: block.to_string(),
        room: room.to_string(),
        login: login.to_string(),
        email: format!("{login}@stud.fit.vutbr.cz"),
    }
}

/// In-memory directory keyed by room code, with rooms that never answer.
struct FakeDirectory {
    people: Vec<Person>,
    broken_rooms: Vec<String>,
    calls: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl RecordSource for FakeDirectory {
    async fn fetch(&self, query: &str) -> Result<Vec<Person>> {
        self.calls.lock().unwrap().push(query.to_string());
        if self.broken_rooms.iter().any(|r| r == query) {
            return Err(AppError::fetch(query, "server closed connection"));
        }
        Ok(self
            .people
            .iter()
            .filter(|p| p.room_code() == query)
            .cloned()
            .collect())
    }
}

fn residents() -> Vec<Person> {
    vec![
        person(1, "Jan Novák", "xnovak00", "B02", "301"),
        person(2, "Tomáš Dvořák", "xdvora01", "B02", "303"),
        person(1, "Tomas Svoboda", "xsvobo02", "B02", "305"),
        person(1, "Eva Malá", "xmalae00", "B02", "349"),
    ]
}

fn fake_fetcher(broken: &[&str]) -> (BatchFetcher, Arc<Mutex<Vec<String>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let source = FakeDirectory {
        people: residents(),
        broken_rooms: broken.iter().map(|r| r.to_string()).collect(),
        calls: calls.clone(),
    };
    let options = BatchOptions {
        batch_size: 10,
        fetch_delay: Duration::ZERO,
        max_attempts: 3,
    };
    (BatchFetcher::network(source, options), calls)
}

fn floor_three() -> Vec<String> {
    prepare_queries(&QueryFilter {
        block: Some("B02".into()),
        floor: Some(3),
        ..QueryFilter::default()
    })
    .unwrap()
}

#[tokio::test]
async fn find_single_stops_after_first_match() {
    let (fetcher, calls) = fake_fetcher(&[]);
    let capture = Capture::default();

    let outcome = run_find(
        &fetcher,
        &floor_three(),
        "tomas",
        false,
        capture.sink(OutputFormat::Csv),
    )
    .await
    .unwrap();

    assert_eq!(
        capture.text(),
        "Tomáš Dvořák,xdvora01,xdvora01@stud.fit.vutbr.cz,B02,303\n"
    );
    assert_eq!(outcome.emitted, 1);
    assert!(outcome.summary.stopped);
    // Only the first batch of ten rooms went out.
    assert_eq!(calls.lock().unwrap().len(), 10);
}

#[tokio::test]
async fn find_multiple_collects_every_match() {
    let (fetcher, calls) = fake_fetcher(&[]);
    let capture = Capture::default();

    let outcome = run_find(
        &fetcher,
        &floor_three(),
        "TOMAS",
        true,
        capture.sink(OutputFormat::Json),
    )
    .await
    .unwrap();

    let found: Vec<Person> = serde_json::from_str(&capture.text()).unwrap();
    let logins: Vec<&str> = found.iter().map(|p| p.login.as_str()).collect();
    assert_eq!(logins, vec!["xdvora01", "xsvobo02"]);
    assert_eq!(outcome.emitted, 2);
    assert!(!outcome.summary.stopped);
    assert_eq!(calls.lock().unwrap().len(), 50);
}

#[tokio::test]
async fn dump_survives_broken_rooms() {
    let (fetcher, calls) = fake_fetcher(&["B02-303"]);
    let capture = Capture::default();

    let outcome = run_dump(&fetcher, &floor_three(), capture.sink(OutputFormat::Text))
        .await
        .unwrap();

    let text = capture.text();
    assert!(text.contains("Jan Novák (xnovak00)"));
    assert!(text.contains("Eva Malá (xmalae00)"));
    assert!(!text.contains("xdvora01"));
    assert_eq!(outcome.emitted, 3);
    assert_eq!(outcome.summary.dropped, 1);

    let attempts = calls
        .lock()
        .unwrap()
        .iter()
        .filter(|q| q.as_str() == "B02-303")
        .count();
    assert_eq!(attempts, 3);
}

#[tokio::test]
async fn find_in_cache_file_without_network() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), serde_json::to_string(&residents()).unwrap()).unwrap();

    let config = Config::default();
    let fetcher = build_fetcher(&config, Some(tmp.path())).unwrap();
    assert!(fetcher.is_cached());

    let capture = Capture::default();
    let outcome = run_find(
        &fetcher,
        &floor_three(),
        "mala",
        false,
        capture.sink(OutputFormat::Text),
    )
    .await
    .unwrap();

    assert_eq!(
        capture.text(),
        "Eva Malá (xmalae00)\nxmalae00@stud.fit.vutbr.cz\nB02 349\n\n"
    );
    assert_eq!(outcome.summary.batches, 0);
}

#[tokio::test]
async fn dump_from_http_directory() {
    let server = MockServer::start().await;
    let page = "<tr><th><font>1.</font> Jan Novák</th></tr>\
                <tr><td>Login:</td><td>xnovak00</td></tr>\
                <tr><td>Blok:</td><td>B02</td></tr>\
                <tr><td>E-mail:</td><td>xnovak00@stud.fit.vutbr.cz</td></tr>\
                <tr><td>Pokoj:</td><td>218</td></tr>";

    Mock::given(method("POST"))
        .and(body_string("str=B02-218"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.fetcher.endpoint = format!("{}/is2/index.html", server.uri());
    config.fetcher.fetch_delay_ms = 0;

    let fetcher = build_fetcher(&config, None).unwrap();
    let queries = prepare_queries(&QueryFilter::room_in("b02", 218)).unwrap();

    let capture = Capture::default();
    let outcome = run_dump(&fetcher, &queries, capture.sink(OutputFormat::Csv))
        .await
        .unwrap();

    assert_eq!(
        capture.text(),
        "Jan Novák,xnovak00,xnovak00@stud.fit.vutbr.cz,B02,218\n"
    );
    assert_eq!(outcome.summary.batches, 1);
}
