//! End-to-end over a real socket, using the shipped endpoint data.

use std::path::Path;
use std::time::Duration;

use tokio::net::TcpListener;

use doaas::catalog::{inspect_dir, load_catalog, Mode};
use doaas::config::ServiceConfig;
use doaas::lifecycle::{bootstrap, Shutdown};

fn shipped_catalog_dir() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("endpoints")
        .to_string_lossy()
        .into_owned()
}

#[test]
fn test_shipped_endpoint_files_are_valid() {
    let reports = inspect_dir(Path::new(&shipped_catalog_dir())).unwrap();
    assert!(!reports.is_empty());
    for report in &reports {
        assert!(report.result.is_ok(), "{}: {:?}", report.path.display(), report.result);
    }

    let catalog = load_catalog(Path::new(&shipped_catalog_dir())).unwrap();
    assert_eq!(catalog.len(), reports.len());
    let blame = catalog.get("blame").unwrap();
    assert!(blame.supports(Mode::Toxic));
    assert!(catalog.get("random").is_some());
}

#[tokio::test]
async fn test_serves_over_tcp_and_shuts_down() {
    let mut config = ServiceConfig::default();
    config.catalog.dir = shipped_catalog_dir();
    let server = bootstrap(config).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    let res = client.get(format!("{base}/blame?mode=toxic")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["cache-control"], "no-store");
    let json: serde_json::Value = res.json().await.unwrap();
    assert_eq!(json["name"], "blame");
    assert_eq!(json["mode"], "toxic");

    let res = client.get(format!("{base}/help")).send().await.unwrap();
    let json: serde_json::Value = res.json().await.unwrap();
    assert_eq!(json["baseUrl"], format!("http://{}/", addr));

    let res = client
        .request(reqwest::Method::OPTIONS, format!("{base}/anything"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 204);

    let res = client.get(format!("{base}/doesnotexist")).send().await.unwrap();
    assert_eq!(res.status(), 404);

    drop(client);
    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
}
