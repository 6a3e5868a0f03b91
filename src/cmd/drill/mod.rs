// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod get;
mod post;
pub mod server;
mod state;
mod template;
mod upload;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use portpicker::pick_unused_port;
    use reqwest::StatusCode;
    use reqwest::multipart::Form;
    use reqwest::multipart::Part;
    use serde_json::Value;
    use tokio::net::TcpStream;
    use tokio::spawn;
    use tokio::time::sleep;

    use crate::cmd::drill::server::DrillOptions;
    use crate::cmd::drill::server::start_server;
    use crate::deck_file::tests::xlsx_bytes;
    use crate::deck_file::tests::xlsx_file;
    use crate::error::Fallible;
    use crate::ingest::HeaderRule;

    fn options(file: Option<PathBuf>, port: u16) -> DrillOptions {
        DrillOptions {
            file,
            host: "127.0.0.1".to_string(),
            port,
            open_browser: false,
            rule: HeaderRule::default(),
        }
    }

    /// Start a server in the background and wait until it accepts connections.
    async fn serve(file: Option<PathBuf>) -> String {
        let port = pick_unused_port().unwrap();
        spawn(async move { start_server(options(file, port)).await });
        let bind = format!("127.0.0.1:{port}");
        loop {
            if let Ok(stream) = TcpStream::connect(&bind).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
        format!("http://{bind}")
    }

    async fn act(base: &str, action: &str) -> String {
        let response = reqwest::Client::new()
            .post(format!("{base}/"))
            .form(&[("action", action)])
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        response.text().await.unwrap()
    }

    async fn upload(base: &str, bytes: Vec<u8>) -> String {
        let part = Part::bytes(bytes).file_name("cards.xlsx");
        let form = Form::new().part("file", part);
        let response = reqwest::Client::new()
            .post(format!("{base}/upload"))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        response.text().await.unwrap()
    }

    async fn api_state(base: &str) -> Value {
        reqwest::get(format!("{base}/api/state"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_start_server_on_non_existent_file() {
        let file = PathBuf::from("./derpherp.xlsx");
        let result = start_server(options(Some(file), 0)).await;
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: file does not exist.");
    }

    #[tokio::test]
    async fn test_start_server_on_header_only_file() {
        let (_dir, path) = xlsx_file(&[&["front", "back", "note"]]);
        let result = start_server(options(Some(path), 0)).await;
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: No valid data found in the file.");
    }

    #[tokio::test]
    async fn test_static_endpoints() -> Fallible<()> {
        let base = serve(None).await;

        let response = reqwest::get(format!("{base}/style.css")).await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        let response = reqwest::get(format!("{base}/script.js")).await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/javascript"
        );

        let response = reqwest::get(format!("{base}/herp-derp")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let base = serve(None).await;

        // Nothing loaded yet.
        let response = reqwest::get(format!("{base}/")).await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        let html = response.text().await.unwrap();
        assert!(html.contains("Upload an Excel file to start practicing flashcards."));

        // Navigation before a deck is loaded does nothing.
        let html = act(&base, "Next").await;
        assert!(html.contains("Upload an Excel file to start practicing flashcards."));

        // Upload a deck with a header row.
        let bytes = xlsx_bytes(&[
            &["eng", "tur", "s1"],
            &["hello", "merhaba", "Hello there."],
            &["bye", "güle güle", "Bye now."],
        ]);
        let html = upload(&base, bytes).await;
        assert!(html.contains("hello"));
        assert!(html.contains("1 / 2"));
        assert!(!html.contains("merhaba"));

        // Flip.
        let html = act(&base, "Flip").await;
        assert!(html.contains("merhaba"));
        assert!(html.contains("Hello there."));

        // Next clears the flip.
        let html = act(&base, "Next").await;
        assert!(html.contains("bye"));
        assert!(html.contains("2 / 2"));
        assert!(!html.contains("güle güle"));

        // Next at the last card is a no-op.
        let html = act(&base, "Next").await;
        assert!(html.contains("2 / 2"));

        let state = api_state(&base).await;
        assert_eq!(state["card"]["position"], 2);
        assert_eq!(state["card"]["total"], 2);
        assert_eq!(state["card"]["flipped"], false);
        assert_eq!(state["card"]["prevEnabled"], true);
        assert_eq!(state["card"]["nextEnabled"], false);
        assert_eq!(state["loading"], false);

        // A broken upload reports an error and keeps the deck.
        let html = upload(&base, b"not a spreadsheet".to_vec()).await;
        assert!(html.contains("Error processing file."));
        assert!(!html.contains("zip"));
        assert!(html.contains("2 / 2"));

        // A header-only upload reports no data and keeps the deck.
        let html = upload(&base, xlsx_bytes(&[&["english"]])).await;
        assert!(html.contains("No valid data found in the file."));
        assert!(html.contains("2 / 2"));

        // Reset.
        act(&base, "Flip").await;
        let html = act(&base, "Reset").await;
        assert!(html.contains("1 / 2"));
        let state = api_state(&base).await;
        assert_eq!(state["card"]["position"], 1);
        assert_eq!(state["card"]["flipped"], false);

        // A new upload replaces the deck and clears the error.
        let html = upload(&base, xlsx_bytes(&[&["cat", "kedi"], &["dog", "köpek"], &["bird", "kuş"]])).await;
        assert!(html.contains("cat"));
        assert!(html.contains("1 / 3"));
        assert!(!html.contains("No valid data found"));

        Ok(())
    }

    #[tokio::test]
    async fn test_initial_file() -> Fallible<()> {
        let (_dir, path) = xlsx_file(&[&["hello", "merhaba", "Hello there."]]);
        let base = serve(Some(path)).await;
        let state = api_state(&base).await;
        assert_eq!(state["card"]["front"], "hello");
        assert_eq!(state["card"]["note"], "Hello there.");
        assert_eq!(state["card"]["prevEnabled"], false);
        assert_eq!(state["card"]["nextEnabled"], false);
        Ok(())
    }

    #[tokio::test]
    async fn test_upload_without_file() -> Fallible<()> {
        let base = serve(None).await;
        let form = Form::new().text("other", "value");
        let response = reqwest::Client::new()
            .post(format!("{base}/upload"))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        let state = api_state(&base).await;
        assert_eq!(state["card"], Value::Null);
        assert_eq!(state["errorMessage"], Value::Null);
        assert_eq!(state["loading"], false);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_action() -> Fallible<()> {
        let base = serve(None).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/"))
            .form(&[("action", "Grade")])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        Ok(())
    }
}
