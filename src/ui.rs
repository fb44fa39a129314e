use crate::ledger::Ledger;
use crate::models::{Entry, EntryKind};

pub fn render_index<P>(date: &str, ledger: &Ledger<P>, filter: &str) -> String {
    let summary = ledger.summary();
    let (progress_width, progress_label) = match summary.progress {
        Some(fraction) => {
            let percent = (fraction.clamp(0.0, 1.0) * 100.0).round();
            (format!("{percent}%"), format!("{percent}%"))
        }
        None => ("0%".to_string(), "--".to_string()),
    };
    let progress_class = if summary.over_limit { "bar over" } else { "bar" };

    INDEX_HTML
        .replace("{{DATE}}", date)
        .replace("{{LIMIT}}", &summary.calorie_limit.to_string())
        .replace("{{TOTAL}}", &summary.total_calories.to_string())
        .replace("{{CONSUMED}}", &summary.consumed.to_string())
        .replace("{{BURNED}}", &summary.burned.to_string())
        .replace("{{REMAINING}}", &summary.remaining.to_string())
        .replace(
            "{{REMAINING_CLASS}}",
            if summary.remaining < 0 { "value over" } else { "value" },
        )
        .replace("{{PROGRESS_CLASS}}", progress_class)
        .replace("{{PROGRESS_WIDTH}}", &progress_width)
        .replace("{{PROGRESS_LABEL}}", &progress_label)
        .replace("{{FILTER}}", &escape_html(filter))
        .replace("{{MEALS}}", &render_items(EntryKind::Meal, &ledger.filter(EntryKind::Meal, filter)))
        .replace(
            "{{WORKOUTS}}",
            &render_items(EntryKind::Workout, &ledger.filter(EntryKind::Workout, filter)),
        )
}

fn render_items(kind: EntryKind, entries: &[&Entry]) -> String {
    if entries.is_empty() {
        return format!(r#"<li class="empty">No {kind}s yet</li>"#);
    }

    let path = match kind {
        EntryKind::Meal => "meals",
        EntryKind::Workout => "workouts",
    };
    entries
        .iter()
        .map(|entry| {
            format!(
                r#"<li class="item {kind}"><span class="name">{name}</span><span class="kcal">{calories}</span><form method="post" action="/{path}/{id}/delete"><button class="btn-remove" type="submit" aria-label="Remove">&times;</button></form></li>"#,
                name = escape_html(&entry.name),
                calories = entry.calories,
                id = entry.id,
            )
        })
        .collect()
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Calorie Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --ok: #2d7a4b;
      --danger: #c63b2b;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: flex-end;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.over {
      color: var(--danger);
    }

    .progress {
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
      height: 22px;
      overflow: hidden;
    }

    .bar {
      height: 100%;
      background: var(--ok);
      color: white;
      font-size: 0.8rem;
      text-align: right;
      padding-right: 8px;
      line-height: 22px;
    }

    .bar.over {
      background: var(--danger);
    }

    .columns {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
      gap: 24px;
    }

    .column {
      display: grid;
      gap: 14px;
      align-content: start;
    }

    form.inline {
      display: flex;
      gap: 8px;
    }

    input {
      flex: 1;
      min-width: 0;
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 12px;
      padding: 10px 12px;
      font: inherit;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      color: white;
      background: var(--accent-2);
    }

    .btn-meal {
      background: var(--accent);
    }

    .btn-remove {
      background: transparent;
      color: var(--danger);
      padding: 2px 8px;
      font-size: 1.2rem;
    }

    ul {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 8px;
    }

    .item {
      display: flex;
      align-items: center;
      gap: 12px;
      background: white;
      border-radius: 14px;
      padding: 10px 14px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .item .name {
      flex: 1;
    }

    .item .kcal {
      font-weight: 600;
      border-radius: 999px;
      padding: 2px 10px;
      color: white;
    }

    .item.meal .kcal {
      background: var(--accent);
    }

    .item.workout .kcal {
      background: var(--accent-2);
    }

    .empty {
      color: #8b857d;
    }

    footer {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      gap: 16px;
    }

    .btn-reset {
      background: var(--danger);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Calorie Tracker</h1>
        <p class="subtitle">Meals add to today's total, workouts take away.</p>
      </div>
      <span class="subtitle">{{DATE}}</span>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Daily limit</span>
        <span id="limit" class="value">{{LIMIT}}</span>
      </div>
      <div class="stat">
        <span class="label">Gain / loss</span>
        <span id="total" class="value">{{TOTAL}}</span>
      </div>
      <div class="stat">
        <span class="label">Consumed</span>
        <span id="consumed" class="value">{{CONSUMED}}</span>
      </div>
      <div class="stat">
        <span class="label">Burned</span>
        <span id="burned" class="value">{{BURNED}}</span>
      </div>
      <div class="stat">
        <span class="label">Remaining</span>
        <span id="remaining" class="{{REMAINING_CLASS}}">{{REMAINING}}</span>
      </div>
    </section>

    <div class="progress" role="progressbar" aria-label="Daily progress">
      <div id="progress" class="{{PROGRESS_CLASS}}" style="width: {{PROGRESS_WIDTH}}">{{PROGRESS_LABEL}}</div>
    </div>

    <form class="inline" method="get" action="/">
      <input type="search" name="filter" placeholder="Filter by name" value="{{FILTER}}" />
      <button type="submit">Filter</button>
    </form>

    <section class="columns">
      <div class="column">
        <h2>Meals</h2>
        <form class="inline" method="post" action="/meals">
          <input type="text" name="name" placeholder="Meal name" />
          <input type="number" name="calories" placeholder="Calories" min="0" />
          <button class="btn-meal" type="submit">Add</button>
        </form>
        <ul id="meal-items">{{MEALS}}</ul>
      </div>
      <div class="column">
        <h2>Workouts</h2>
        <form class="inline" method="post" action="/workouts">
          <input type="text" name="name" placeholder="Workout name" />
          <input type="number" name="calories" placeholder="Calories" min="0" />
          <button type="submit">Add</button>
        </form>
        <ul id="workout-items">{{WORKOUTS}}</ul>
      </div>
    </section>

    <footer>
      <form class="inline" method="post" action="/limit">
        <input type="number" name="limit" placeholder="New daily limit" min="1" />
        <button type="submit">Set limit</button>
      </form>
      <form method="post" action="/reset">
        <button class="btn-reset" type="submit">Reset day</button>
      </form>
    </footer>
  </main>
</body>
</html>
"#;
