use super::*;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Mutex;
use std::thread::JoinHandle;

fn http_response(status: u16, body: &str) -> String {
    format!(
        "HTTP/1.1 {} {}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {}",
        status,
        match status {
            200 => "OK",
            404 => "Not Found",
            500 => "Internal Server Error",
            _ => "Unknown",
        },
        body.len(),
        body
    )
}

/// Read one HTTP request (headers plus `Content-Length` body).
fn read_request(stream: &mut std::net::TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        data.extend_from_slice(&buf[..n]);
        let text = String::from_utf8_lossy(&data);
        if let Some(end) = text.find("\r\n\r\n") {
            let content_length = text[..end]
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if data.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).into_owned()
}

/// Serve a single response on an ephemeral port; the handle yields the raw
/// request that was received.
fn start_test_server(status: u16, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind to ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    let response = http_response(status, body);

    let handle = std::thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return String::new();
        };
        let request = read_request(&mut stream);
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.flush();
        request
    });

    (format!("http://{addr}"), handle)
}

fn backend(url: &str) -> HttpBackend {
    HttpBackend::new(url, Duration::from_secs(5)).expect("valid url")
}

mod http {
    use super::*;

    #[test]
    fn fetch_history_decodes_entries() {
        let body = r#"[{"id":1,"query":"fiebre"},{"id":2,"query":"tos","strategy":"Semantic"}]"#;
        let (url, server) = start_test_server(200, body);

        let entries = backend(&url).fetch_history().expect("fetch succeeds");
        let request = server.join().expect("server thread");

        assert!(request.starts_with("GET /historial "));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].query, "tos");
        assert_eq!(entries[1].strategy, crate::model::SearchStrategy::Semantic);
    }

    #[test]
    fn error_status_is_server_error() {
        let (url, server) = start_test_server(500, "{}");

        let result = backend(&url).fetch_history();
        server.join().expect("server thread");

        assert_eq!(result, Err(RequestError::Server { status: 500 }));
    }

    #[test]
    fn bad_body_is_decode_error() {
        let (url, server) = start_test_server(200, r#"{"not":"an array"}"#);

        let result = backend(&url).fetch_history();
        server.join().expect("server thread");

        assert!(matches!(result, Err(RequestError::Decode(_))));
    }

    #[test]
    fn delete_history_encodes_query() {
        let (url, server) = start_test_server(200, "");

        backend(&url).delete_history("a b&c").expect("delete succeeds");
        let request = server.join().expect("server thread");

        assert!(
            request.starts_with("DELETE /historial?query=a+b%26c "),
            "got {request}"
        );
    }

    #[test]
    fn save_favorite_posts_json() {
        let (url, server) = start_test_server(200, "Busqueda añadida");
        let body = SaveFavoriteRequest::new("uno".into(), &["a".into()], &["q".into()]);

        backend(&url).save_favorite(&body).expect("save succeeds");
        let request = server.join().expect("server thread");

        assert!(request.starts_with("POST /favoritos "));
        assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
        assert!(request.contains(r#""nombre":"uno""#));
        assert!(request.contains(r#""data":"[\"a\"]""#));
    }

    #[test]
    fn fetch_favorites_unwraps_envelope() {
        let body = r#"{"favoritos":[{"id":3,"nombre":"uno","data":"[\"a\"]","busquedas":[],"fecha":"2024-01-01"}]}"#;
        let (url, server) = start_test_server(200, body);

        let favorites = backend(&url).fetch_favorites().expect("fetch succeeds");
        server.join().expect("server thread");

        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].nombre, "uno");
    }

    #[test]
    fn search_sends_form_parameters() {
        let body = r#"{"table":{"msg":"","columns":["id"],"rows":[["1"]]},"pages":1}"#;
        let (url, server) = start_test_server(200, body);
        let params: SearchParams = vec![("query", "dolor".into()), ("k", "5".into())];

        let response = backend(&url).search(&params).expect("search succeeds");
        let request = server.join().expect("server thread");

        assert!(request.starts_with("GET /search?query=dolor&k=5 "));
        assert_eq!(response.table.row_count(), 1);
    }

    #[test]
    fn refused_connection_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = backend(&format!("http://{addr}")).fetch_history();

        assert!(matches!(result, Err(RequestError::Network(_))));
    }

    #[test]
    fn base_path_gets_trailing_slash() {
        let backend = backend("http://localhost:3000/app");
        assert_eq!(backend.base_url().path(), "/app/");
    }

    #[test]
    fn invalid_url_is_rejected() {
        assert!(HttpBackend::new("not a url", Duration::from_secs(1)).is_err());
    }
}

mod dispatch {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl SearchBackend for Recorder {
        fn fetch_history(&self) -> Result<Vec<HistoryEntry>, RequestError> {
            self.calls.lock().unwrap().push("history".into());
            Ok(vec![HistoryEntry::new("a")])
        }
        fn delete_history(&self, query: &str) -> Result<(), RequestError> {
            self.calls.lock().unwrap().push(format!("delete:{query}"));
            Err(RequestError::Server { status: 500 })
        }
        fn fetch_favorites(&self) -> Result<Vec<Favorite>, RequestError> {
            Ok(Vec::new())
        }
        fn save_favorite(&self, _request: &SaveFavoriteRequest) -> Result<(), RequestError> {
            Ok(())
        }
        fn delete_favorite(&self, _nombre: &str) -> Result<(), RequestError> {
            Ok(())
        }
        fn search(&self, _params: &SearchParams) -> Result<SearchResponse, RequestError> {
            Ok(SearchResponse::default())
        }
    }

    #[test]
    fn inline_completions_wait_for_drain() {
        let recorder = Arc::new(Recorder::default());
        let mut dispatcher = Dispatcher::new(recorder.clone(), DispatchMode::Inline);

        dispatcher.dispatch_all([
            Request::FetchHistory,
            Request::DeleteHistory { query: "x".into() },
        ]);
        assert_eq!(dispatcher.in_flight(), 2);

        let completions = dispatcher.drain();

        assert_eq!(dispatcher.in_flight(), 0);
        assert_eq!(
            completions,
            vec![
                Completion::History(Ok(vec![HistoryEntry::new("a")])),
                Completion::HistoryDeleted {
                    query: "x".into(),
                    result: Err(RequestError::Server { status: 500 }),
                },
            ]
        );
        assert_eq!(
            *recorder.calls.lock().unwrap(),
            vec!["history".to_string(), "delete:x".to_string()]
        );
    }

    #[test]
    fn threaded_completion_arrives() {
        let mut dispatcher = Dispatcher::new(Arc::new(Recorder::default()), DispatchMode::Threaded);
        dispatcher.dispatch(Request::FetchFavorites);

        let mut completions = Vec::new();
        for _ in 0..200 {
            completions.extend(dispatcher.drain());
            if !completions.is_empty() {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(completions, vec![Completion::Favorites(Ok(Vec::new()))]);
    }
}
