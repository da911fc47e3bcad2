//! Embedded HTML/CSS/JS frontend for the etsm dashboard.
//!
//! Compiled into the binary as a string constant. The page fetches the
//! JSON API and builds every table and chart in the browser.

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>ETSM Dashboard</title>
<style>
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --muted: #8b949e;
  --accent: #d97757;
  --green: #3fb950;
  --yellow: #d29922;
  --red: #f85149;
  --blue: #58a6ff;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}
* { margin: 0; padding: 0; box-sizing: border-box; }
body { background: var(--bg); color: var(--text); font-family: var(--font); font-size: 14px; line-height: 1.5; }
.app { max-width: 1200px; margin: 0 auto; padding: 24px; }

header { display: flex; align-items: center; justify-content: space-between; margin-bottom: 24px;
  padding-bottom: 16px; border-bottom: 1px solid var(--border); }
header h1 { font-size: 22px; font-weight: 600; }
header h1 span { color: var(--accent); }
.seed-box { display: flex; gap: 8px; align-items: center; color: var(--muted); font-size: 12px; }
.seed-box input { width: 180px; }

input, select, textarea { background: var(--bg); color: var(--text); border: 1px solid var(--border);
  border-radius: 6px; padding: 6px 10px; font-family: var(--mono); font-size: 13px; }
textarea { width: 100%; min-height: 260px; resize: vertical; }
button.btn { padding: 7px 16px; border: 1px solid var(--border); border-radius: 6px; background: var(--surface);
  color: var(--text); cursor: pointer; font-weight: 500; }
button.btn.primary { background: var(--accent); border-color: var(--accent); color: #fff; }
button.btn:disabled { opacity: 0.5; cursor: wait; }

nav { display: flex; gap: 4px; margin-bottom: 24px; background: var(--surface); border-radius: var(--radius);
  padding: 4px; border: 1px solid var(--border); }
nav button { flex: 1; padding: 8px 16px; border: none; border-radius: 6px; background: transparent;
  color: var(--muted); font-size: 13px; font-weight: 500; cursor: pointer; }
nav button:hover { color: var(--text); }
nav button.active { background: var(--accent); color: #fff; }

.panel { display: none; }
.panel.active { display: block; }
.card { background: var(--surface); border: 1px solid var(--border); border-radius: var(--radius);
  padding: 20px; margin-bottom: 16px; }
.card h2 { font-size: 16px; font-weight: 600; margin-bottom: 16px; }

.stats-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 16px; margin-bottom: 16px; }
.stat-card { background: var(--surface); border: 1px solid var(--border); border-radius: var(--radius);
  padding: 20px; text-align: center; }
.stat-card .value { font-size: 28px; font-weight: 700; font-family: var(--mono); color: var(--blue); }
.stat-card .label { font-size: 12px; color: var(--muted); margin-top: 6px; text-transform: uppercase; letter-spacing: 0.5px; }

table { width: 100%; border-collapse: collapse; }
th, td { padding: 8px 10px; text-align: left; border-bottom: 1px solid var(--border); }
th { color: var(--muted); font-weight: 500; font-size: 12px; text-transform: uppercase; }
td.num, th.num { text-align: right; font-family: var(--mono); }

.bars .row { display: flex; align-items: center; gap: 10px; margin-bottom: 6px; font-size: 12px; }
.bars .row .name { width: 140px; color: var(--muted); }
.bars .row .bar { height: 14px; background: var(--blue); border-radius: 3px; }
.bars .row .n { font-family: var(--mono); }

.strategy { border-left: 4px solid var(--border); padding: 12px 16px; margin-bottom: 12px;
  background: var(--bg); border-radius: 0 6px 6px 0; }
.strategy.s-in-progress { border-color: var(--blue); }
.strategy.s-planning { border-color: var(--yellow); }
.strategy.s-completed { border-color: var(--green); }
.strategy.s-on-hold { border-color: var(--red); }
.strategy h3 { font-size: 14px; margin-bottom: 4px; }
.strategy .meta { color: var(--muted); font-size: 12px; }

.pill { display: inline-block; padding: 2px 8px; border-radius: 10px; font-size: 11px; font-weight: 600; }
.pill.good { color: var(--green); border: 1px solid var(--green); }
.pill.mid { color: var(--yellow); border: 1px solid var(--yellow); }
.pill.bad { color: var(--red); border: 1px solid var(--red); }

.analysis { white-space: pre-wrap; font-size: 13px; margin-top: 16px; }
.analysis.error { color: var(--red); }
.banner { display: none; white-space: pre-wrap; font-size: 13px; color: var(--red); border: 1px solid var(--red); border-radius: 6px; padding: 10px 14px; margin-bottom: 16px; }
.banner.show { display: block; }
.row-flex { display: flex; gap: 12px; align-items: center; margin: 12px 0; }
</style>
</head>
<body>
<div class="app">

<header>
  <h1><span>ETSM</span> Account Dashboard</h1>
  <div class="seed-box">
    <label for="seed">seed</label>
    <input type="text" id="seed" placeholder="random">
    <button class="btn" id="btn-regen">Regenerate</button>
    <span id="key-status"></span>
  </div>
</header>

<div class="banner" id="key-banner"></div>

<nav id="nav">
  <button class="active" data-panel="usage">API Usage</button>
  <button data-panel="strategies">Strategy Boards</button>
  <button data-panel="executives">Executives</button>
  <button data-panel="planning">Account Planning</button>
  <button data-panel="analysis">AI Insights</button>
</nav>

<div class="panel active" id="panel-usage">
  <div class="stats-grid">
    <div class="stat-card"><div class="value" id="m-calls">-</div><div class="label">Total API calls</div></div>
    <div class="stat-card"><div class="value" id="m-growth">-</div><div class="label">Average growth</div></div>
    <div class="stat-card"><div class="value" id="m-accounts">-</div><div class="label">Active accounts</div></div>
    <div class="stat-card"><div class="value" id="m-revenue">-</div><div class="label">Total revenue</div></div>
  </div>
  <div class="card"><h2>Current Usage by Company</h2><div class="bars" id="usage-bars"></div></div>
  <div class="card">
    <h2>Account Overview</h2>
    <table>
      <thead><tr><th>Company</th><th class="num">Total calls</th><th class="num">Avg monthly</th>
        <th class="num">Revenue</th><th class="num">Use cases</th><th class="num">Growth</th><th>Health</th></tr></thead>
      <tbody id="overview-tbody"></tbody>
    </table>
  </div>
</div>

<div class="panel" id="panel-strategies">
  <div class="stats-grid">
    <div class="stat-card"><div class="value" id="s-pipeline">-</div><div class="label">Total pipeline</div></div>
    <div class="stat-card"><div class="value" id="s-progress">-</div><div class="label">In progress</div></div>
    <div class="stat-card"><div class="value" id="s-completed">-</div><div class="label">Completed</div></div>
  </div>
  <div class="card"><h2>Active Strategies</h2><div id="strategy-list"></div></div>
  <div class="card"><h2>Priority Distribution</h2><div class="bars" id="priority-bars"></div></div>
</div>

<div class="panel" id="panel-executives">
  <div class="card">
    <h2>Executive Relationships</h2>
    <table>
      <thead><tr><th>Name</th><th>Title</th><th>Company</th><th class="num">Score</th><th>Last meeting</th>
        <th>Next meeting</th><th class="num">Initiatives</th><th>Influence</th><th>Decision maker</th></tr></thead>
      <tbody id="exec-tbody"></tbody>
    </table>
  </div>
</div>

<div class="panel" id="panel-planning">
  <div class="card">
    <h2>Account Planning</h2>
    <table>
      <thead><tr><th>Account</th><th class="num">Health</th><th>Risk</th><th class="num">API usage</th>
        <th class="num">Growth</th><th>Next quarter goal</th><th>Stakeholders</th><th>Next QBR</th></tr></thead>
      <tbody id="planning-tbody"></tbody>
    </table>
  </div>
</div>

<div class="panel" id="panel-analysis">
  <div class="card">
    <h2>AI-Powered Strategic Insights</h2>
    <textarea id="prompt"></textarea>
    <div class="row-flex">
      <label for="model">model</label>
      <input type="text" id="model" style="width:320px">
      <button class="btn primary" id="btn-analyze">Generate Analysis</button>
    </div>
    <div class="analysis" id="analysis-out"></div>
  </div>
</div>

</div>

<script>
// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------
let currentPanel = 'usage';

function seedQuery() {
  const s = document.getElementById('seed').value.trim();
  return s ? '?seed=' + encodeURIComponent(s) : '';
}

async function api(method, path, body) {
  const opts = { method, headers: {} };
  if (body) {
    opts.headers['Content-Type'] = 'application/json';
    opts.body = JSON.stringify(body);
  }
  const res = await fetch(path, opts);
  return res.json();
}

// Pin the seed a response was generated with so every panel agrees.
function pinSeed(data) {
  const el = document.getElementById('seed');
  if (!el.value.trim() && data.seed !== undefined) el.value = String(data.seed);
}

function fmt(n) { return n === null || n === undefined ? '-' : Math.round(n).toLocaleString(); }
function money(n) { return '$' + Number(n).toLocaleString(undefined, { maximumFractionDigits: 2 }); }
function growth(g) { return g === null || g === undefined ? 'n/a' : (g >= 0 ? '+' : '') + (g * 100).toFixed(1) + '%'; }
function slug(s) { return String(s).toLowerCase().replace(/\s+/g, '-'); }
function esc(s) {
  if (s === null || s === undefined) return '';
  return String(s).replace(/&/g,'&amp;').replace(/</g,'&lt;').replace(/>/g,'&gt;').replace(/"/g,'&quot;');
}
function scorePill(n) {
  const cls = n >= 75 ? 'good' : n >= 50 ? 'mid' : 'bad';
  return `<span class="pill ${cls}">${n}</span>`;
}
function bars(el, rows) {
  const max = Math.max(1, ...rows.map(r => r.value));
  el.innerHTML = rows.map(r =>
    `<div class="row"><span class="name">${esc(r.name)}</span>` +
    `<span class="bar" style="width:${Math.max(2, 60 * r.value / max)}%"></span>` +
    `<span class="n">${fmt(r.value)}</span></div>`).join('');
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------
document.getElementById('nav').addEventListener('click', e => {
  if (e.target.tagName !== 'BUTTON') return;
  const panel = e.target.dataset.panel;
  document.querySelectorAll('nav button').forEach(b => b.classList.remove('active'));
  e.target.classList.add('active');
  document.querySelectorAll('.panel').forEach(p => p.classList.remove('active'));
  document.getElementById('panel-' + panel).classList.add('active');
  currentPanel = panel;
  loadPanel(panel);
});

document.getElementById('btn-regen').addEventListener('click', () => {
  document.getElementById('seed').value = '';
  loadPanel(currentPanel);
});

async function loadPanel(panel) {
  switch (panel) {
    case 'usage': return loadUsage();
    case 'strategies': return loadStrategies();
    case 'executives': return loadExecutives();
    case 'planning': return loadPlanning();
    case 'analysis': return loadPrompt();
  }
}

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------
async function loadUsage() {
  const u = await api('GET', '/api/usage' + seedQuery());
  pinSeed(u);
  document.getElementById('m-calls').textContent = fmt(u.metrics.total_api_calls);
  document.getElementById('m-growth').textContent = growth(u.metrics.average_growth);
  document.getElementById('m-accounts').textContent = u.metrics.active_accounts;
  document.getElementById('m-revenue').textContent = money(u.metrics.total_revenue);
  bars(document.getElementById('usage-bars'),
    u.growth.map(g => ({ name: g.company, value: g.latest_calls })));

  const o = await api('GET', '/api/overview' + seedQuery());
  document.getElementById('overview-tbody').innerHTML = o.accounts.map((a, i) => {
    const h = o.health[i];
    const cls = h.indicator === 'Healthy Growth' ? 'good' : h.indicator === 'Declining Usage' ? 'bad' : 'mid';
    return `<tr><td>${esc(a.company)}</td><td class="num">${fmt(a.total_api_calls)}</td>` +
      `<td class="num">${fmt(a.avg_monthly_calls)}</td><td class="num">${money(a.total_revenue)}</td>` +
      `<td class="num">${a.use_cases}</td><td class="num">${growth(h.growth_rate)}</td>` +
      `<td><span class="pill ${cls}">${esc(h.indicator)}</span></td></tr>`;
  }).join('');
}

async function loadStrategies() {
  const s = await api('GET', '/api/strategies' + seedQuery());
  document.getElementById('s-pipeline').textContent = money(s.overview.total_pipeline);
  document.getElementById('s-progress').textContent = s.overview.in_progress;
  document.getElementById('s-completed').textContent = s.overview.completed;
  document.getElementById('strategy-list').innerHTML = s.strategies.map(x =>
    `<div class="strategy s-${slug(x.status)}"><h3>${esc(x.account)} - ${esc(x.strategy)}</h3>` +
    `<div class="meta">${esc(x.status)} &middot; ${esc(x.priority)} priority &middot; ${money(x.expected_revenue)}` +
    ` &middot; ${esc(x.timeline)} &middot; ${esc(x.stakeholder)}</div>` +
    `<div>${esc(x.description)}</div></div>`).join('');
  bars(document.getElementById('priority-bars'),
    s.overview.by_priority.map(p => ({ name: p.priority, value: p.count })));
}

async function loadExecutives() {
  const e = await api('GET', '/api/executives' + seedQuery());
  pinSeed(e);
  document.getElementById('exec-tbody').innerHTML = e.executives.map(x =>
    `<tr><td>${esc(x.name)}</td><td>${esc(x.title)}</td><td>${esc(x.company)}</td>` +
    `<td class="num">${scorePill(x.relationship_score)}</td><td>${esc(x.last_meeting)}</td>` +
    `<td>${esc(x.next_meeting)}</td><td class="num">${x.strategic_initiatives}</td>` +
    `<td>${esc(x.influence_level)}</td><td>${x.decision_maker ? 'yes' : 'no'}</td></tr>`).join('');
}

async function loadPlanning() {
  const p = await api('GET', '/api/planning' + seedQuery());
  pinSeed(p);
  document.getElementById('planning-tbody').innerHTML = p.accounts.map(x =>
    `<tr><td>${esc(x.account)}</td><td class="num">${scorePill(x.health_score)}</td><td>${esc(x.risk_level)}</td>` +
    `<td class="num">${fmt(x.api_usage)}</td><td class="num">${growth(x.growth_rate)}</td>` +
    `<td>${esc(x.next_quarter_goal)}</td><td>${esc(x.key_stakeholders)}</td><td>${esc(x.next_qbr)}</td></tr>`).join('');
}

async function loadPrompt() {
  const p = await api('GET', '/api/prompt' + seedQuery());
  pinSeed(p);
  const el = document.getElementById('prompt');
  if (!el.value.trim()) el.value = p.prompt;
  const model = document.getElementById('model');
  if (!model.value.trim()) model.value = p.model;
}

document.getElementById('btn-analyze').addEventListener('click', async () => {
  const btn = document.getElementById('btn-analyze');
  const out = document.getElementById('analysis-out');
  btn.disabled = true;
  out.className = 'analysis';
  out.textContent = 'Analyzing...';
  try {
    const r = await api('POST', '/api/analyze', {
      prompt: document.getElementById('prompt').value,
      model: document.getElementById('model').value,
    });
    if (r.error) {
      out.className = 'analysis error';
      out.textContent = r.error;
    } else {
      out.className = r.ok ? 'analysis' : 'analysis error';
      out.textContent = r.response;
    }
  } catch (e) {
    out.className = 'analysis error';
    out.textContent = String(e);
  } finally {
    btn.disabled = false;
  }
});

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------
async function loadHealth() {
  try {
    const h = await api('GET', '/api/health');
    const cls = h.api_key_configured ? 'good' : 'bad';
    document.getElementById('key-status').innerHTML =
      `<span class="pill ${cls}">${h.api_key_configured ? 'API key set' : 'API key missing'}</span>`;
    const banner = document.getElementById('key-banner');
    banner.textContent = h.api_key_help || '';
    banner.classList.toggle('show', Boolean(h.api_key_help));
  } catch (e) {
    // badge is optional
  }
}

loadHealth();
loadUsage();
</script>
</body>
</html>"##;
