//! Embedded HTML/CSS/JS frontend for the bannerdash web dashboard.
//!
//! The entire SPA is compiled into the binary as a string constant.
//! No external assets, no build tools, no CDN dependencies.

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="ko">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>BANNER AD Analytics</title>
<style>
:root {
  --bg: #f8fafc;
  --surface: #ffffff;
  --border: #e2e8f0;
  --text: #0f172a;
  --text-muted: #64748b;
  --accent: #4f46e5;
  --blue: #3b82f6;
  --orange: #f97316;
  --green: #16a34a;
  --yellow: #ca8a04;
  --red: #dc2626;
  --purple: #9333ea;
  --radius: 12px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Apple SD Gothic Neo', 'Malgun Gothic', sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

/* Layout */
.app { max-width: 1200px; margin: 0 auto; padding: 24px; }

header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  flex-wrap: wrap;
  gap: 12px;
  margin-bottom: 24px;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--border);
}
header h1 { font-size: 22px; font-weight: 800; }
header h1 .logo { color: var(--accent); }

nav { display: flex; gap: 4px; background: var(--border); padding: 4px; border-radius: var(--radius); }
nav button, .filters button {
  border: 0;
  background: transparent;
  padding: 8px 16px;
  border-radius: 8px;
  font: inherit;
  font-weight: 600;
  color: var(--text-muted);
  cursor: pointer;
}
nav button.active, .filters button.active { background: var(--surface); color: var(--accent); }

.panel { display: none; }
.panel.active { display: block; }

.toolbar { display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px; gap: 12px; flex-wrap: wrap; }
.filters { display: flex; gap: 4px; background: var(--border); padding: 4px; border-radius: var(--radius); }

/* Cards */
.cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 16px; margin-bottom: 24px; }
.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
}
.card .label { color: var(--text-muted); font-size: 12px; font-weight: 600; text-transform: uppercase; }
.card .value { font-size: 24px; font-weight: 800; margin: 4px 0; }
.card .sub { color: var(--text-muted); font-size: 12px; }
.card.blue .value { color: var(--blue); }
.card.yellow .value { color: var(--yellow); }
.card.green .value { color: var(--green); }
.card.purple .value { color: var(--purple); }

.section {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
  margin-bottom: 24px;
}
.section h2 { font-size: 16px; margin-bottom: 12px; display: flex; justify-content: space-between; align-items: center; }

/* Table */
table { width: 100%; border-collapse: collapse; }
th, td { padding: 8px 10px; border-bottom: 1px solid var(--border); text-align: right; white-space: nowrap; }
th:first-child, td:first-child, th:nth-child(2), td:nth-child(2) { text-align: left; }
th { color: var(--text-muted); font-size: 12px; }
td.high { color: var(--red); font-weight: 700; }
.tag { padding: 2px 8px; border-radius: 999px; font-size: 11px; font-weight: 700; }
.tag.PC { background: #dbeafe; color: var(--blue); }
.tag.Mobile { background: #ffedd5; color: var(--orange); }

/* Chart */
.bar-row { display: grid; grid-template-columns: 160px 1fr 90px; align-items: center; gap: 8px; margin: 6px 0; }
.bar-row .name { overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
.bar-row .track { background: var(--bg); border-radius: 6px; height: 18px; }
.bar-row .fill { height: 100%; border-radius: 6px; }
.bar-row .fill.PC { background: var(--blue); }
.bar-row .fill.Mobile { background: var(--orange); }
.bar-row .num { text-align: right; font-family: var(--mono); font-size: 12px; color: var(--text-muted); }
select, input, textarea {
  font: inherit;
  padding: 8px 10px;
  border: 1px solid var(--border);
  border-radius: 8px;
  background: var(--surface);
}

/* Insights */
.insight-body { white-space: pre-wrap; color: var(--text); min-height: 48px; }
.insight-body.muted { color: var(--text-muted); }

/* Forms */
.form-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 12px; margin-bottom: 12px; }
.form-grid label { display: flex; flex-direction: column; gap: 4px; font-size: 12px; color: var(--text-muted); font-weight: 600; }
textarea { width: 100%; min-height: 140px; font-family: var(--mono); font-size: 12px; margin-bottom: 12px; }
.btn {
  border: 0;
  background: var(--accent);
  color: #fff;
  padding: 8px 16px;
  border-radius: 8px;
  font: inherit;
  font-weight: 700;
  cursor: pointer;
}
.btn:disabled { opacity: 0.5; cursor: default; }
.btn.danger { background: transparent; color: var(--red); padding: 4px 8px; }

.toast {
  position: fixed;
  bottom: 24px;
  right: 24px;
  background: var(--text);
  color: #fff;
  padding: 10px 16px;
  border-radius: 8px;
  opacity: 0;
  transition: opacity 0.2s;
}
.toast.show { opacity: 1; }
.toast.error { background: var(--red); }
</style>
</head>
<body>
<div class="app">
  <header>
    <h1><span class="logo">BANNER</span> AD Analytics</h1>
    <nav id="nav">
      <button class="active" data-panel="dashboard">Dashboard</button>
      <button data-panel="manager">Data Manager</button>
    </nav>
  </header>

  <!-- Dashboard -->
  <section class="panel active" id="panel-dashboard">
    <div class="toolbar">
      <div class="filters" id="filters">
        <button data-filter="All" class="active">All</button>
        <button data-filter="PC">PC</button>
        <button data-filter="Mobile">Mobile</button>
      </div>
      <button class="btn" id="insight-btn">AI Insights</button>
    </div>

    <div class="cards">
      <div class="card blue"><div class="label">Total Impressions</div><div class="value" id="stat-total">-</div><div class="sub">Monthly Aggregated</div></div>
      <div class="card yellow"><div class="label">Average CTR</div><div class="value" id="stat-ctr">-</div><div class="sub">Conversion Efficiency</div></div>
      <div class="card green"><div class="label">Best CPC Location</div><div class="value" id="stat-cpc">-</div><div class="sub" id="stat-cpc-sub">-</div></div>
      <div class="card purple"><div class="label">Peak Exposure</div><div class="value" id="stat-peak">-</div><div class="sub" id="stat-peak-sub">-</div></div>
    </div>

    <div class="section" id="insight-section" hidden>
      <h2>AI Insights <span class="sub" id="insight-meta"></span></h2>
      <div class="insight-body muted" id="insight-body"></div>
    </div>

    <div class="section">
      <h2>Ranking
        <select id="metric">
          <option value="impressions">노출량</option>
          <option value="cpc">CPC</option>
          <option value="cpm">CPM</option>
          <option value="ctr">CTR</option>
        </select>
      </h2>
      <div id="chart"></div>
    </div>

    <div class="section">
      <h2>Placements</h2>
      <div style="overflow-x:auto">
        <table>
          <thead><tr>
            <th>배너 위치</th><th>플랫폼</th><th>평균 노출수 (1M)</th><th>평균 클릭수 (1M)</th><th>CTR</th>
            <th>평균 노출수 (4W)</th><th>평균 클릭수 (4W)</th><th>CPC</th><th>CPM</th>
          </tr></thead>
          <tbody id="records"></tbody>
        </table>
      </div>
    </div>
  </section>

  <!-- Data manager -->
  <section class="panel" id="panel-manager">
    <div class="section">
      <h2>Bulk Paste</h2>
      <textarea id="paste-text" placeholder="위치&#9;노출(1M)&#9;클릭(1M)&#9;CTR&#9;노출(4W)&#9;클릭(4W)&#9;CPC&#9;CPM"></textarea>
      <select id="paste-platform"><option>PC</option><option>Mobile</option></select>
      <button class="btn" id="paste-btn">Add Rows</button>
    </div>

    <div class="section">
      <h2>Manual Entry</h2>
      <form id="entry-form">
        <div class="form-grid">
          <label>배너 위치<input name="location"></label>
          <label>플랫폼<select name="platform"><option>PC</option><option>Mobile</option></select></label>
          <label>평균 노출수 (1M)<input name="avgImpressions1M"></label>
          <label>평균 클릭수 (1M)<input name="avgClicks1M"></label>
          <label>평균 노출수 (4W)<input name="avgImpressions4W"></label>
          <label>평균 클릭수 (4W)<input name="avgClicks4W"></label>
          <label>CPC<input name="cpc"></label>
          <label>CPM<input name="cpm"></label>
        </div>
        <button class="btn" type="submit">Add Record</button>
      </form>
    </div>

    <div class="section">
      <h2>Records <span class="sub" id="manager-count"></span></h2>
      <table>
        <thead><tr><th>배너 위치</th><th>플랫폼</th><th>노출 (1M)</th><th>CTR</th><th>CPC</th><th></th></tr></thead>
        <tbody id="manager-records"></tbody>
      </table>
    </div>
  </section>
</div>
<div class="toast" id="toast"></div>

<script>
// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------
let metric = 'impressions';
let insightTimer = null;

// ---------------------------------------------------------------------------
// API helpers
// ---------------------------------------------------------------------------
async function api(method, path, body) {
  const opts = { method, headers: {} };
  if (body) {
    opts.headers['Content-Type'] = 'application/json';
    opts.body = JSON.stringify(body);
  }
  const res = await fetch(path, opts);
  const data = await res.json();
  if (!res.ok) throw new Error(data.error || res.statusText);
  return data;
}

function toast(msg, isError) {
  const el = document.getElementById('toast');
  el.textContent = msg;
  el.className = 'toast show' + (isError ? ' error' : '');
  setTimeout(() => el.className = 'toast', 3000);
}

function fmt(n) {
  if (n === undefined || n === null) return '-';
  return n.toLocaleString();
}

function won(n) {
  return '₩' + fmt(n);
}

function metricValue(m, v) {
  if (m === 'ctr') return v.toFixed(2) + '%';
  return m === 'impressions' ? fmt(Math.round(v)) : won(Math.round(v));
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
  if (panel === 'manager') loadManager(); else loadDashboard();
});

document.getElementById('filters').addEventListener('click', async e => {
  if (e.target.tagName !== 'BUTTON') return;
  try {
    await api('PUT', '/api/filter', { platform: e.target.dataset.filter });
    loadDashboard();
  } catch (err) {
    toast(err.message, true);
  }
});

document.getElementById('metric').addEventListener('change', e => {
  metric = e.target.value;
  loadDashboard();
});

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------
async function loadDashboard() {
  try {
    renderDashboard(await api('GET', '/api/dashboard?metric=' + metric));
  } catch (e) {
    toast('Failed to load dashboard: ' + e.message, true);
  }
}

function renderDashboard(d) {
  document.querySelectorAll('#filters button').forEach(b =>
    b.classList.toggle('active', b.dataset.filter === d.filter));

  const s = d.summary;
  document.getElementById('stat-total').textContent = fmt(s.total_impressions);
  document.getElementById('stat-ctr').textContent = s.avg_ctr.toFixed(2) + '%';
  document.getElementById('stat-cpc').textContent = s.best_cpc ? s.best_cpc.location : '-';
  document.getElementById('stat-cpc-sub').textContent = won(s.best_cpc ? s.best_cpc.cpc : 0) + ' Avg';
  document.getElementById('stat-peak').textContent = s.peak_impressions ? s.peak_impressions.location : '-';
  document.getElementById('stat-peak-sub').textContent =
    ((s.peak_impressions ? s.peak_impressions.avgImpressions1M : 0) / 1e6).toFixed(1) + 'M Imp';

  const max = d.chart.reduce((m, b) => Math.max(m, b.value), 0);
  document.getElementById('chart').innerHTML = d.chart.map(b => `
    <div class="bar-row">
      <span class="name">${esc(b.location)}</span>
      <div class="track"><div class="fill ${b.platform}" style="width:${max > 0 ? (b.value / max) * 100 : 0}%"></div></div>
      <span class="num">${metricValue(d.metric, b.value)}</span>
    </div>`).join('');

  document.getElementById('records').innerHTML = d.records.map(r => `
    <tr>
      <td>${esc(r.location)}</td>
      <td><span class="tag ${r.platform}">${r.platform}</span></td>
      <td>${fmt(r.avgImpressions1M)}</td>
      <td>${fmt(r.avgClicks1M)}</td>
      <td class="${r.ctr > 0.15 ? 'high' : ''}">${r.ctr.toFixed(2)}%</td>
      <td>${fmt(r.avgImpressions4W)}</td>
      <td>${fmt(r.avgClicks4W)}</td>
      <td>${won(r.cpc)}</td>
      <td>${won(r.cpm)}</td>
    </tr>`).join('');
}

// ---------------------------------------------------------------------------
// Insights
// ---------------------------------------------------------------------------
document.getElementById('insight-btn').addEventListener('click', async () => {
  const btn = document.getElementById('insight-btn');
  try {
    const started = await api('POST', '/api/insights');
    btn.disabled = true;
    document.getElementById('insight-section').hidden = false;
    document.getElementById('insight-body').className = 'insight-body muted';
    document.getElementById('insight-body').textContent = 'Analyzing ' + started.record_count + ' records...';
    clearInterval(insightTimer);
    insightTimer = setInterval(pollInsights, 1000);
  } catch (e) {
    toast(e.message, true);
  }
});

async function pollInsights() {
  try {
    const s = await api('GET', '/api/insights');
    if (s.pending > 0 || !s.last) return;
    clearInterval(insightTimer);
    document.getElementById('insight-btn').disabled = false;
    const body = document.getElementById('insight-body');
    body.className = 'insight-body' + (s.last.outcome === 'generated' ? '' : ' muted');
    body.textContent = s.last.text;
    document.getElementById('insight-meta').textContent =
      s.last.record_count + ' records · ' + s.last.latency_ms + ' ms';
  } catch (e) {
    clearInterval(insightTimer);
    document.getElementById('insight-btn').disabled = false;
  }
}

// ---------------------------------------------------------------------------
// Data manager
// ---------------------------------------------------------------------------
async function loadManager() {
  try {
    const d = await api('GET', '/api/records');
    document.getElementById('manager-count').textContent = d.records.length + ' / ' + d.total;
    document.getElementById('manager-records').innerHTML = d.records.map(r => `
      <tr>
        <td>${esc(r.location)}</td>
        <td><span class="tag ${r.platform}">${r.platform}</span></td>
        <td>${fmt(r.avgImpressions1M)}</td>
        <td>${r.ctr.toFixed(2)}%</td>
        <td>${won(r.cpc)}</td>
        <td><button class="btn danger" data-index="${r.index}">삭제</button></td>
      </tr>`).join('');
  } catch (e) {
    toast('Failed to load records: ' + e.message, true);
  }
}

document.getElementById('manager-records').addEventListener('click', async e => {
  const index = e.target.dataset.index;
  if (index === undefined) return;
  try {
    const res = await api('DELETE', '/api/records/' + index);
    toast(res.message);
    loadManager();
  } catch (err) {
    toast(err.message, true);
  }
});

document.getElementById('paste-btn').addEventListener('click', async () => {
  const text = document.getElementById('paste-text').value;
  const platform = document.getElementById('paste-platform').value;
  try {
    const res = await api('POST', '/api/records/bulk', { text, platform });
    document.getElementById('paste-text').value = '';
    toast(res.message);
    loadManager();
  } catch (e) {
    toast(e.message, true);
  }
});

document.getElementById('entry-form').addEventListener('submit', async e => {
  e.preventDefault();
  const form = e.target;
  const entry = Object.fromEntries(new FormData(form).entries());
  try {
    const res = await api('POST', '/api/records', entry);
    form.reset();
    toast(res.message);
    loadManager();
  } catch (err) {
    toast(err.message, true);
  }
});

// ---------------------------------------------------------------------------
// Utility
// ---------------------------------------------------------------------------
function esc(s) {
  if (!s) return '';
  return s.replace(/&/g,'&amp;').replace(/</g,'&lt;').replace(/>/g,'&gt;').replace(/"/g,'&quot;');
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------
loadDashboard();
</script>
</body>
</html>"##;
