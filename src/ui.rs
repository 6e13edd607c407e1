use crate::models::{DailyRecord, HistorySummary, TaskKey, CHALLENGE_LENGTH_DAYS};
use crate::records::TodayView;
use crate::stats;

pub fn render_today(view: &TodayView) -> String {
    let completed = stats::completed_count(&view.record);
    let percent = (view.day_number as f64 / CHALLENGE_LENGTH_DAYS as f64 * 100.0).clamp(0.0, 100.0);
    TODAY_HTML
        .replace("{{DATE}}", &view.record.date)
        .replace("{{DAY_NUMBER}}", &view.day_number.to_string())
        .replace("{{DONE_COUNT}}", &completed.to_string())
        .replace("{{PERCENT}}", &format!("{percent:.0}"))
        .replace(
            "{{BANNER_HIDDEN}}",
            if stats::is_complete(&view.record) {
                ""
            } else {
                "hidden"
            },
        )
        .replace("{{TASK_CARDS}}", &task_cards(&view.record))
}

pub fn render_history(history: &HistorySummary) -> String {
    HISTORY_HTML
        .replace("{{STREAK}}", &history.current_streak.to_string())
        .replace("{{CURRENT_DAY}}", &history.current_day.to_string())
        .replace("{{ATTEMPTS}}", &history.attempt_count.to_string())
        .replace(
            "{{RESET_DISABLED}}",
            if history.days.is_empty() { "disabled" } else { "" },
        )
}

fn task_cards(record: &DailyRecord) -> String {
    TaskKey::ALL
        .into_iter()
        .map(|task| {
            let done = record.completed(task);
            format!(
                r#"      <article class="task{done_class}" data-task="{name}" data-field="{field}">
        <div class="task-copy">
          <h3>{label}</h3>
          <p>{description}</p>
        </div>
        <form method="post" action="/tasks/{name}/toggle">
          <button class="toggle" type="submit">{state}</button>
        </form>
      </article>
"#,
                done_class = if done { " done" } else { "" },
                name = task.name(),
                field = task.field_name(),
                label = task.label(),
                description = task.description(),
                state = if done { "Done" } else { "Mark done" },
            )
        })
        .collect()
}

const TODAY_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>75 Hard Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Outfit:wght@400;500;600&family=Lora:wght@600&display=swap');

    :root {
      --bg-1: #eef7f1;
      --bg-2: #bfe3cf;
      --ink: #1f2d27;
      --accent: #0f9d6b;
      --accent-2: #234d3c;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(35, 77, 60, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e4f3e9 60%, #f2f8f1 100%);
      color: var(--ink);
      font-family: "Outfit", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
      animation: rise 600ms ease;
    }

    .masthead {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      font-family: "Lora", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.9rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f6c64;
      font-size: 0.98rem;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(35, 77, 60, 0.08);
      border-radius: 999px;
    }

    .tab {
      border-radius: 999px;
      padding: 8px 14px;
      font-size: 0.9rem;
      font-weight: 600;
      color: #5c6a61;
      text-decoration: none;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(35, 77, 60, 0.12);
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(35, 77, 60, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      display: block;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #7d8a81;
    }

    .stat .value {
      display: block;
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .progress {
      display: grid;
      gap: 6px;
    }

    .meter {
      height: 10px;
      border-radius: 999px;
      background: rgba(35, 77, 60, 0.12);
      overflow: hidden;
    }

    .meter-fill {
      height: 100%;
      border-radius: 999px;
      background: var(--accent);
      transition: width 300ms ease;
    }

    .meter-text {
      font-size: 0.85rem;
      color: #6b7a71;
      text-align: right;
    }

    .banner {
      background: linear-gradient(120deg, #0f9d6b, #2bb585);
      color: white;
      border-radius: 18px;
      padding: 16px 20px;
      font-weight: 600;
    }

    .tasks {
      display: grid;
      gap: 14px;
    }

    .task {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(35, 77, 60, 0.08);
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
      transition: border-color 150ms ease, background 150ms ease;
    }

    .task.done {
      border-color: rgba(15, 157, 107, 0.5);
      background: #f2fbf6;
    }

    .task-copy h3 {
      margin: 0 0 4px;
      font-size: 1.05rem;
    }

    .task-copy p {
      margin: 0;
      color: #5f6c64;
      font-size: 0.9rem;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
      display: inline-flex;
      align-items: center;
      justify-content: center;
    }

    button:active {
      transform: scale(0.98);
    }

    .toggle {
      background: var(--accent-2);
      color: white;
      box-shadow: 0 10px 24px rgba(35, 77, 60, 0.25);
      white-space: nowrap;
    }

    .task.done .toggle {
      background: var(--accent);
      box-shadow: 0 10px 24px rgba(15, 157, 107, 0.3);
    }

    .btn-retry {
      background: var(--accent-2);
      color: white;
      padding: 8px 14px;
      font-size: 0.85rem;
    }

    .status-row {
      display: flex;
      align-items: center;
      gap: 12px;
      min-height: 1.6em;
    }

    .status {
      font-size: 0.95rem;
      color: #5c6a61;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .hint {
      margin: 0;
      color: #68756c;
      font-size: 0.9rem;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
      .task {
        flex-direction: column;
        align-items: stretch;
        text-align: left;
      }
      .toggle {
        width: 100%;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header class="masthead">
      <div>
        <h1>75 Hard</h1>
        <p class="subtitle">Six tasks, every day, for 75 days.</p>
      </div>
      <nav class="tabs">
        <a class="tab active" href="/">Today</a>
        <a class="tab" href="/history">History</a>
      </nav>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Date</span>
        <span id="date" class="value">{{DATE}}</span>
      </div>
      <div class="stat">
        <span class="label">Challenge day</span>
        <span id="day-number" class="value">{{DAY_NUMBER}}</span>
      </div>
      <div class="stat">
        <span class="label">Tasks done</span>
        <span class="value"><span id="done-count">{{DONE_COUNT}}</span>/6</span>
      </div>
    </section>

    <div class="progress">
      <div class="meter"><div id="day-progress" class="meter-fill" style="width: {{PERCENT}}%"></div></div>
      <span id="day-percent" class="meter-text">{{PERCENT}}% complete</span>
    </div>

    <div id="banner" class="banner" {{BANNER_HIDDEN}}>All tasks completed for today!</div>

    <section id="tasks" class="tasks">
{{TASK_CARDS}}    </section>

    <div class="status-row">
      <div class="status" id="status"></div>
      <button class="btn-retry" id="retry" type="button" hidden>Retry save</button>
    </div>
    <p class="hint">Days are keyed to the server's calendar date. Saving writes the whole day at once.</p>
  </main>

  <script>
    const dateEl = document.getElementById('date');
    const dayEl = document.getElementById('day-number');
    const countEl = document.getElementById('done-count');
    const barEl = document.getElementById('day-progress');
    const percentEl = document.getElementById('day-percent');
    const bannerEl = document.getElementById('banner');
    const statusEl = document.getElementById('status');
    const retryBtn = document.getElementById('retry');
    const cards = Array.from(document.querySelectorAll('.task'));
    const fields = cards.map((card) => card.dataset.field);

    let record = null;
    let pendingRetry = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const completedCount = (rec) => fields.reduce((acc, field) => acc + (rec[field] ? 1 : 0), 0);

    const paintCard = (card, done) => {
      card.classList.toggle('done', done);
      card.querySelector('.toggle').textContent = done ? 'Done' : 'Mark done';
    };

    const paintRecord = (rec) => {
      record = rec;
      const done = completedCount(rec);
      countEl.textContent = done;
      bannerEl.hidden = done !== fields.length;
      cards.forEach((card) => paintCard(card, Boolean(rec[card.dataset.field])));
    };

    const updateUI = (data) => {
      const percent = Math.min(100, Math.round((data.day_number / 75) * 100));
      dateEl.textContent = data.record.date;
      dayEl.textContent = data.day_number;
      barEl.style.width = `${percent}%`;
      percentEl.textContent = `${percent}% complete`;
      paintRecord(data.record);
    };

    const loadToday = async () => {
      const res = await fetch('/api/today');
      if (!res.ok) {
        throw new Error('Unable to load today');
      }
      updateUI(await res.json());
    };

    const sendRecord = async (updated) => {
      setStatus('Saving...', 'info');
      const res = await fetch('/api/tasks', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(updated)
      });

      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }

      updateUI(await res.json());
      pendingRetry = null;
      retryBtn.hidden = true;
      setStatus('Saved', 'ok');
      setTimeout(() => setStatus('', ''), 1200);
    };

    const saveWithRevert = (updated, previous) => {
      paintRecord(updated);
      sendRecord(updated).catch((err) => {
        paintRecord(previous);
        pendingRetry = { updated, previous };
        retryBtn.hidden = false;
        setStatus(err.message, 'error');
      });
    };

    cards.forEach((card) => {
      card.querySelector('form').addEventListener('submit', (event) => {
        event.preventDefault();
        if (!record) {
          return;
        }
        const field = card.dataset.field;
        const previous = record;
        const updated = { ...previous, [field]: !previous[field] };
        saveWithRevert(updated, previous);
      });
    });

    retryBtn.addEventListener('click', () => {
      if (!pendingRetry) {
        return;
      }
      const { updated, previous } = pendingRetry;
      pendingRetry = null;
      retryBtn.hidden = true;
      saveWithRevert(updated, previous);
    });

    loadToday().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;

const HISTORY_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>75 Hard Tracker - History</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Outfit:wght@400;500;600&family=Lora:wght@600&display=swap');

    :root {
      --bg-1: #eef7f1;
      --bg-2: #bfe3cf;
      --ink: #1f2d27;
      --accent: #0f9d6b;
      --accent-2: #234d3c;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(35, 77, 60, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e4f3e9 60%, #f2f8f1 100%);
      color: var(--ink);
      font-family: "Outfit", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
      animation: rise 600ms ease;
    }

    .masthead {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      font-family: "Lora", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.9rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f6c64;
      font-size: 0.98rem;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(35, 77, 60, 0.08);
      border-radius: 999px;
    }

    .tab {
      border-radius: 999px;
      padding: 8px 14px;
      font-size: 0.9rem;
      font-weight: 600;
      color: #5c6a61;
      text-decoration: none;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(35, 77, 60, 0.12);
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(35, 77, 60, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      display: block;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #7d8a81;
    }

    .stat .value {
      display: block;
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .days {
      display: grid;
      gap: 14px;
    }

    .day {
      background: white;
      border-radius: 18px;
      padding: 16px 18px;
      border: 1px solid rgba(35, 77, 60, 0.08);
      display: grid;
      gap: 10px;
    }

    .day.current {
      border-color: var(--accent);
      box-shadow: 0 12px 28px rgba(15, 157, 107, 0.16);
    }

    .day-head {
      display: flex;
      align-items: center;
      gap: 12px;
      flex-wrap: wrap;
    }

    .day-number {
      font-weight: 600;
      color: var(--accent-2);
    }

    .day-date {
      color: #5f6c64;
      font-size: 0.95rem;
    }

    .badge {
      margin-left: auto;
      font-size: 0.8rem;
      border-radius: 999px;
      padding: 4px 10px;
      background: rgba(35, 77, 60, 0.1);
      color: #4a5a51;
    }

    .badge.ok {
      background: rgba(15, 157, 107, 0.15);
      color: #0c7a55;
    }

    .meter {
      height: 8px;
      border-radius: 999px;
      background: rgba(35, 77, 60, 0.12);
      overflow: hidden;
    }

    .meter-fill {
      height: 100%;
      border-radius: 999px;
      background: var(--accent);
    }

    .day-count {
      font-size: 0.85rem;
      color: #6b7a71;
    }

    .empty {
      margin: 0;
      color: #6b7a71;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
      display: inline-flex;
      align-items: center;
      justify-content: center;
    }

    button:active {
      transform: scale(0.98);
    }

    .btn-reset {
      background: #c2452f;
      color: white;
      box-shadow: 0 10px 24px rgba(194, 69, 47, 0.3);
    }

    .btn-reset:disabled {
      opacity: 0.5;
      cursor: not-allowed;
      box-shadow: none;
    }

    .status {
      font-size: 0.95rem;
      color: #5c6a61;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .hint {
      margin: 0;
      color: #68756c;
      font-size: 0.9rem;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
      .btn-reset {
        width: 100%;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header class="masthead">
      <div>
        <h1>History</h1>
        <p class="subtitle">Every recorded day of the current challenge.</p>
      </div>
      <nav class="tabs">
        <a class="tab" href="/">Today</a>
        <a class="tab active" href="/history">History</a>
      </nav>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Current streak</span>
        <span id="streak" class="value">{{STREAK}}</span>
      </div>
      <div class="stat">
        <span class="label">Challenge day</span>
        <span id="current-day" class="value">{{CURRENT_DAY}}</span>
      </div>
      <div class="stat">
        <span class="label">Attempts</span>
        <span id="attempts" class="value">{{ATTEMPTS}}</span>
      </div>
    </section>

    <section id="days" class="days">
      <p class="empty">Loading...</p>
    </section>

    <form id="reset-form" method="post" action="/history/reset">
      <button class="btn-reset" id="reset-btn" type="submit" {{RESET_DISABLED}}>Reset progress</button>
    </form>

    <div class="status" id="status"></div>
    <p class="hint">A perfect day checks off all six tasks. Resetting deletes every recorded day.</p>
  </main>

  <script>
    const streakEl = document.getElementById('streak');
    const currentDayEl = document.getElementById('current-day');
    const attemptsEl = document.getElementById('attempts');
    const daysEl = document.getElementById('days');
    const statusEl = document.getElementById('status');
    const resetForm = document.getElementById('reset-form');
    const resetBtn = document.getElementById('reset-btn');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const formatDate = (value) => new Date(`${value}T00:00:00`).toLocaleDateString('en-US', {
      month: 'short',
      day: 'numeric',
      year: 'numeric'
    });

    const renderDays = (days) => {
      if (!days.length) {
        daysEl.innerHTML = '<p class="empty">No history data yet. Complete your first day to see it here.</p>';
        return;
      }

      daysEl.innerHTML = days
        .map((day) => {
          const badge = day.all_completed
            ? '<span class="badge ok">Completed</span>'
            : '<span class="badge">Incomplete</span>';
          const width = Math.round((day.completed_tasks / 6) * 100);
          return `
            <article class="day${day.is_current ? ' current' : ''}">
              <div class="day-head">
                <span class="day-number">Day ${day.day_number}</span>
                <span class="day-date">${formatDate(day.date)}</span>
                ${badge}
              </div>
              <div class="meter"><div class="meter-fill" style="width: ${width}%"></div></div>
              <span class="day-count">${day.completed_tasks}/6 tasks</span>
            </article>
          `;
        })
        .join('');
    };

    const updateUI = (data) => {
      streakEl.textContent = data.current_streak;
      currentDayEl.textContent = data.current_day;
      attemptsEl.textContent = data.attempt_count;
      resetBtn.disabled = !data.days.length;
      renderDays(data.days);
    };

    const loadHistory = async () => {
      const res = await fetch('/api/history');
      if (!res.ok) {
        throw new Error('Unable to load history');
      }
      updateUI(await res.json());
    };

    const sendReset = async () => {
      setStatus('Resetting...', 'info');
      const res = await fetch('/api/reset', { method: 'POST' });

      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }

      updateUI(await res.json());
      setStatus('Progress cleared', 'ok');
      setTimeout(() => setStatus('', ''), 1200);
    };

    resetForm.addEventListener('submit', (event) => {
      event.preventDefault();
      if (!window.confirm('Reset all your challenge data? This action cannot be undone.')) {
        return;
      }
      sendReset().catch((err) => setStatus(err.message, 'error'));
    });

    loadHistory().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
