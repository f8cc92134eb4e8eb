use crate::habits::{weekly_percent, HabitState};
use crate::models::TaskId;

pub fn render_index(state: Option<&HabitState>) -> String {
    let Some(state) = state else {
        return INDEX_HTML
            .replace("{{WEEK_START}}", "-")
            .replace("{{TODAY}}", "<p class=\"subtitle\">Loading&hellip;</p>")
            .replace("{{WEEK}}", "");
    };

    let today: String = TaskId::ALL
        .into_iter()
        .map(|task| render_task(task, state.daily[task]))
        .collect();
    let week: String = TaskId::ALL
        .into_iter()
        .map(|task| render_progress(task, state.weekly[task]))
        .collect();

    INDEX_HTML
        .replace("{{WEEK_START}}", &state.keys.week_start)
        .replace("{{TODAY}}", &today)
        .replace("{{WEEK}}", &week)
}

fn render_task(task: TaskId, done: bool) -> String {
    format!(
        r#"<form method="post" action="/toggle/{id}" class="task{class}">
        <button type="submit" aria-pressed="{done}"><span class="box">{mark}</span>{label}</button>
      </form>
"#,
        id = task.as_str(),
        class = if done { " done" } else { "" },
        mark = if done { "&#10003;" } else { "" },
        label = task.label(),
    )
}

fn render_progress(task: TaskId, count: u32) -> String {
    let pct = weekly_percent(count);
    format!(
        r#"<div class="progress">
        <div class="progress-head"><span>{label}</span><span>{count}/7 &middot; {pct}%</span></div>
        <div class="bar"><div class="fill" style="width: {pct}%"></div></div>
      </div>
"#,
        label = task.label(),
    )
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Tracker</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(640px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1, h2 {
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f5c57;
    }

    .tasks {
      display: grid;
      gap: 12px;
    }

    .task button {
      width: 100%;
      display: flex;
      align-items: center;
      gap: 12px;
      border: 1px solid rgba(47, 72, 88, 0.12);
      border-radius: 18px;
      background: white;
      padding: 14px 18px;
      font-size: 1rem;
      cursor: pointer;
    }

    .box {
      width: 22px;
      height: 22px;
      border-radius: 6px;
      border: 2px solid var(--accent-2);
      display: inline-grid;
      place-items: center;
      color: white;
    }

    .task.done .box {
      background: var(--accent);
      border-color: var(--accent);
    }

    .progress {
      display: grid;
      gap: 6px;
    }

    .progress-head {
      display: flex;
      justify-content: space-between;
    }

    .bar {
      height: 10px;
      border-radius: 999px;
      background: rgba(47, 72, 88, 0.1);
      overflow: hidden;
    }

    .fill {
      height: 100%;
      background: var(--accent-2);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Today</h1>
      <p class="subtitle">Three habits, one tap each.</p>
    </header>
    <section class="tasks">
      {{TODAY}}
    </section>
    <section class="tasks">
      <h2>This week</h2>
      <p class="subtitle">Week of {{WEEK_START}}</p>
      {{WEEK}}
    </section>
  </main>
</body>
</html>
"#;
