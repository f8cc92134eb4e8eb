use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct TaskStatus {
    task: String,
    done_today: bool,
    weekly_count: u32,
    weekly_percent: u8,
}

#[derive(Debug, Deserialize)]
struct HabitsResponse {
    ready: bool,
    week_start_key: Option<String>,
    tasks: Vec<TaskStatus>,
}

impl HabitsResponse {
    fn task(&self, id: &str) -> &TaskStatus {
        self.tasks
            .iter()
            .find(|status| status.task == id)
            .expect("missing task")
    }
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("habit_tracker_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/habits")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_habit_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn fetch_habits(client: &Client, base_url: &str) -> HabitsResponse {
    client
        .get(format!("{base_url}/api/habits"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn post_toggle(client: &Client, base_url: &str, task: &str) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/toggle"))
        .json(&serde_json::json!({ "task": task }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_toggle_twice_restores_state() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_habits(&client, &server.base_url).await;
    assert!(before.ready);
    assert!(before.week_start_key.is_some());
    let gym = before.task("gym");

    let response = post_toggle(&client, &server.base_url, "gym").await;
    assert!(response.status().is_success());
    let toggled: HabitsResponse = response.json().await.unwrap();
    assert_eq!(toggled.task("gym").done_today, !gym.done_today);
    if gym.done_today {
        assert_eq!(toggled.task("gym").weekly_count, gym.weekly_count.saturating_sub(1));
    } else {
        assert_eq!(toggled.task("gym").weekly_count, gym.weekly_count + 1);
    }

    let response = post_toggle(&client, &server.base_url, "gym").await;
    assert!(response.status().is_success());

    let after = fetch_habits(&client, &server.base_url).await;
    assert_eq!(after.task("gym").done_today, gym.done_today);
    assert_eq!(after.task("gym").weekly_count, gym.weekly_count);
    assert_eq!(after.task("gym").weekly_percent, gym.weekly_percent);
}

#[tokio::test]
async fn http_form_toggle_redirects_home() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let before = fetch_habits(&client, &server.base_url).await;
    let response = client
        .post(format!("{}/toggle/school", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_redirection());

    let after = fetch_habits(&client, &server.base_url).await;
    assert_eq!(
        after.task("school").done_today,
        !before.task("school").done_today
    );
    assert_eq!(after.task("work").done_today, before.task("work").done_today);
}

#[tokio::test]
async fn http_unknown_task_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_habits(&client, &server.base_url).await;
    let response = client
        .post(format!("{}/toggle/chores", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());

    let response = post_toggle(&client, &server.base_url, "chores").await;
    assert!(response.status().is_client_error());

    let after = fetch_habits(&client, &server.base_url).await;
    for (was, now) in before.tasks.iter().zip(&after.tasks) {
        assert_eq!(was.done_today, now.done_today);
        assert_eq!(was.weekly_count, now.weekly_count);
    }
}
