use std::fmt::Write;

use crate::{
    constants::AUTO_REFRESH_MS,
    error::Result,
    surface::{group_by_category, Category, RestEndpoint},
    util::{escape_html, escape_script_json},
};

/// Controls rendered on the card of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Controls {
    ReadOnly,
    /// (action, label) pairs, one button each
    Actions(&'static [(&'static str, &'static str)]),
    /// Free input of the given HTML input type plus a Set button
    Value(&'static str),
    Time,
    Options,
}

const ON_OFF_TOGGLE: &[(&str, &str)] = &[
    ("turn_on", "On"),
    ("turn_off", "Off"),
    ("toggle", "Toggle"),
];

fn controls(category: Category) -> Controls {
    match category {
        Category::Switch | Category::Light | Category::Fan => Controls::Actions(ON_OFF_TOGGLE),
        Category::Button => Controls::Actions(&[("press", "Press")]),
        Category::Cover => Controls::Actions(&[
            ("open", "Open"),
            ("close", "Close"),
            ("stop", "Stop"),
        ]),
        Category::Lock => Controls::Actions(&[("lock", "Lock"), ("unlock", "Unlock")]),
        Category::Number | Category::Climate => Controls::Value("number"),
        Category::Text => Controls::Value("text"),
        Category::Time => Controls::Time,
        Category::Select => Controls::Options,
        _ => Controls::ReadOnly,
    }
}

const STYLE: &str = r#"    :root {
      --bg: #f4f5f7;
      --card: #ffffff;
      --text: #1f2933;
      --muted: #6b7785;
      --accent: #1f6feb;
      --error: #c62828;
    }
    * { box-sizing: border-box; }
    body {
      margin: 0;
      font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
      background: var(--bg);
      color: var(--text);
    }
    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 1rem;
      padding: 1rem 1.5rem;
      background: var(--card);
      box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
    }
    header h1 { margin: 0; font-size: 1.4rem; }
    .toolbar { display: flex; align-items: center; gap: 0.5rem; }
    #status { color: var(--muted); font-size: 0.85rem; }
    main { padding: 1.5rem; }
    .group h2 { font-size: 1.1rem; margin: 1.5rem 0 0.75rem; }
    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
      gap: 1rem;
    }
    .card {
      background: var(--card);
      border-radius: 8px;
      padding: 1rem;
      box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
      border-left: 4px solid var(--accent);
    }
    .card.error { border-left-color: var(--error); }
    .card h3 { margin: 0 0 0.25rem; font-size: 1rem; }
    .path { color: var(--muted); font-size: 0.8rem; }
    .state { margin: 0.75rem 0; font-size: 1.3rem; font-weight: 600; word-break: break-word; }
    .card.error .state { color: var(--error); font-size: 0.9rem; }
    .controls { display: flex; flex-wrap: wrap; gap: 0.4rem; }
    .controls input, .controls select { flex: 1; min-width: 0; padding: 0.35rem; }
    button {
      border: 1px solid var(--accent);
      background: var(--accent);
      color: #fff;
      border-radius: 4px;
      padding: 0.35rem 0.8rem;
      cursor: pointer;
    }
    button[aria-pressed="false"] { background: transparent; color: var(--accent); }
    .empty { color: var(--muted); }
"#;

const SCRIPT: &str = r#"    import { getEntity, postAction, postValue, postTime } from './api.js';

    const ENTITIES = JSON.parse(document.getElementById('entities').textContent);
    const REFRESH_INTERVAL_MS = __REFRESH_MS__;

    const statusLine = document.getElementById('status');
    const autoButton = document.getElementById('auto-refresh');

    function cardFor(path) {
      return document.querySelector(`.card[data-path="${CSS.escape(path)}"]`);
    }

    function formatState(data) {
      if (data === null || typeof data !== 'object') return String(data);
      if ('state' in data) return String(data.state);
      if ('value' in data) return String(data.value);
      return JSON.stringify(data);
    }

    async function refreshEntity(entity) {
      const card = cardFor(entity.path);
      if (!card) return;
      const stateEl = card.querySelector('[data-state]');
      try {
        stateEl.textContent = formatState(await getEntity(entity.path));
        card.classList.remove('error');
      } catch (err) {
        stateEl.textContent = err.message;
        card.classList.add('error');
      }
    }

    async function refreshAll() {
      statusLine.textContent = 'Refreshing...';
      for (const entity of ENTITIES) {
        if (entity.methods.includes('GET')) {
          await refreshEntity(entity);
        }
      }
      statusLine.textContent = `Updated ${new Date().toLocaleTimeString()}`;
    }

    // Idle <-> Polling
    const autoRefresh = {
      state: 'Idle',
      timer: null,
      toggle() {
        if (this.state === 'Idle') {
          this.timer = setInterval(refreshAll, REFRESH_INTERVAL_MS);
          this.state = 'Polling';
          refreshAll();
        } else {
          clearInterval(this.timer);
          this.timer = null;
          this.state = 'Idle';
        }
        const polling = this.state === 'Polling';
        autoButton.textContent = `Auto refresh: ${polling ? 'on' : 'off'}`;
        autoButton.setAttribute('aria-pressed', String(polling));
      },
    };

    async function runControl(button) {
      const card = button.closest('.card');
      const path = card.dataset.path;
      const input = card.querySelector('[data-input]');
      if (button.dataset.action) {
        await postAction(path, button.dataset.action);
      } else if (button.dataset.set === 'time') {
        const [hour = '0', minute = '0', second = '0'] = input.value.split(':');
        await postTime(path, Number(hour), Number(minute), Number(second));
      } else {
        await postValue(path, input.value);
      }
      const entity = ENTITIES.find((e) => e.path === path);
      if (entity) await refreshEntity(entity);
    }

    document.addEventListener('click', (event) => {
      const button = event.target.closest('.card button');
      if (!button) return;
      runControl(button).catch((err) => {
        statusLine.textContent = `${button.closest('.card').dataset.path}: ${err.message}`;
      });
    });
    document.getElementById('refresh-all').addEventListener('click', () => refreshAll());
    autoButton.addEventListener('click', () => autoRefresh.toggle());

    refreshAll();
"#;

/// Renders the dashboard document for the given endpoints
pub fn render(device_name: &str, endpoints: &[RestEndpoint]) -> Result<String> {
    let name = escape_html(device_name);
    let entities = escape_script_json(&serde_json::to_string(endpoints)?);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"utf-8\">\n");
    html.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    _ = writeln!(html, "  <title>{} Dashboard</title>", name);
    html.push_str("  <style>\n");
    html.push_str(STYLE);
    html.push_str("  </style>\n</head>\n<body>\n");

    html.push_str("  <header>\n");
    _ = writeln!(html, "    <h1>{}</h1>", name);
    html.push_str("    <div class=\"toolbar\">\n");
    html.push_str("      <button id=\"refresh-all\" type=\"button\">Refresh all</button>\n");
    html.push_str(
        "      <button id=\"auto-refresh\" type=\"button\" aria-pressed=\"false\">Auto refresh: off</button>\n",
    );
    html.push_str("      <span id=\"status\"></span>\n");
    html.push_str("    </div>\n  </header>\n");

    html.push_str("  <main>\n");
    if endpoints.is_empty() {
        html.push_str("    <p class=\"empty\">This device exposes no REST endpoints.</p>\n");
    }
    for (category, group) in group_by_category(endpoints) {
        html.push_str("    <section class=\"group\">\n");
        _ = writeln!(html, "      <h2>{}</h2>", category.label());
        html.push_str("      <div class=\"cards\">\n");
        for endpoint in group {
            write_card(&mut html, endpoint);
        }
        html.push_str("      </div>\n    </section>\n");
    }
    html.push_str("  </main>\n");

    _ = writeln!(
        html,
        "  <script id=\"entities\" type=\"application/json\">{}</script>",
        entities
    );
    html.push_str("  <script type=\"module\">\n");
    html.push_str(&SCRIPT.replace("__REFRESH_MS__", &AUTO_REFRESH_MS.to_string()));
    html.push_str("  </script>\n</body>\n</html>\n");
    Ok(html)
}

fn write_card(html: &mut String, endpoint: &RestEndpoint) {
    let path = escape_html(&endpoint.path);
    _ = writeln!(html, "        <article class=\"card\" data-path=\"{}\">", path);
    _ = writeln!(html, "          <h3>{}</h3>", escape_html(&endpoint.entity_name));
    _ = writeln!(html, "          <code class=\"path\">{}</code>", path);
    html.push_str("          <div class=\"state\" data-state>&ndash;</div>\n");

    match controls(endpoint.category) {
        Controls::ReadOnly => {}
        Controls::Actions(actions) => {
            html.push_str("          <div class=\"controls\">\n");
            for (action, label) in actions {
                _ = writeln!(
                    html,
                    "            <button type=\"button\" data-action=\"{}\">{}</button>",
                    action, label
                );
            }
            html.push_str("          </div>\n");
        }
        Controls::Value(input_type) => {
            html.push_str("          <div class=\"controls\">\n");
            let step = if input_type == "number" { " step=\"any\"" } else { "" };
            _ = writeln!(
                html,
                "            <input data-input type=\"{}\"{} aria-label=\"Value\">",
                input_type, step
            );
            html.push_str("            <button type=\"button\" data-set=\"value\">Set</button>\n");
            html.push_str("          </div>\n");
        }
        Controls::Time => {
            html.push_str("          <div class=\"controls\">\n");
            html.push_str(
                "            <input data-input type=\"time\" step=\"1\" aria-label=\"Time\">\n",
            );
            html.push_str("            <button type=\"button\" data-set=\"time\">Set</button>\n");
            html.push_str("          </div>\n");
        }
        Controls::Options => {
            html.push_str("          <div class=\"controls\">\n");
            html.push_str("            <select data-input aria-label=\"Option\">\n");
            for option in &endpoint.options {
                let option = escape_html(option);
                _ = writeln!(
                    html,
                    "              <option value=\"{}\">{}</option>",
                    option, option
                );
            }
            html.push_str("            </select>\n");
            html.push_str("            <button type=\"button\" data-set=\"value\">Set</button>\n");
            html.push_str("          </div>\n");
        }
    }

    html.push_str("        </article>\n");
}

#[cfg(test)]
mod test {
    use crate::surface::{synthesize, Entity, RestEndpoint};

    use super::render;

    fn endpoints() -> Vec<RestEndpoint> {
        synthesize(&[
            Entity::new(1, "SwitchInfo", "Pool Pump", "pool_pump"),
            Entity::new(2, "SensorInfo", "Water <Temp>", "water_temperature"),
            Entity::new(3, "SelectInfo", "Mode", "mode")
                .with_options(vec!["auto".into(), "\"service\"".into()]),
            Entity::new(4, "TimeInfo", "Start", "start"),
            Entity::new(5, "NumberInfo", "Chlorine", "chlorine"),
            Entity::new(6, "CoverInfo", "Pool Cover", "pool_cover"),
            Entity::new(7, "LockInfo", "Gate", "gate"),
            Entity::new(8, "ButtonInfo", "Restart", "restart"),
            Entity::new(9, "TextInfo", "Label", "label"),
            Entity::new(10, "ClimateInfo", "Heater", "heater"),
        ])
        .endpoints
    }

    fn card<'a>(html: &'a str, path: &str) -> &'a str {
        let start = html
            .find(&format!("data-path=\"{}\"", path))
            .unwrap_or_else(|| panic!("no card for {}", path));
        let end = start + html[start..].find("</article>").unwrap();
        &html[start..end]
    }

    #[test]
    fn test_cards_in_display_order() {
        let html = render("Pool Controller", &endpoints()).unwrap();
        let order = [
            "/sensor/water_temperature",
            "/switch/pool_pump",
            "/button/restart",
            "/cover/pool_cover",
            "/climate/heater",
            "/number/chlorine",
            "/select/mode",
            "/lock/gate",
            "/time/start",
            "/text/label",
        ];
        let positions = order
            .iter()
            .map(|path| html.find(&format!("data-path=\"{}\"", path)).unwrap())
            .collect::<Vec<_>>();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(html.matches("<article class=\"card\"").count(), 10);
        assert_eq!(html.matches("<section class=\"group\">").count(), 10);
    }

    #[test]
    fn test_controls() {
        let html = render("Pool Controller", &endpoints()).unwrap();

        let sensor = card(&html, "/sensor/water_temperature");
        assert!(sensor.contains("Water &lt;Temp&gt;"));
        assert!(sensor.contains("data-state"));
        assert!(!sensor.contains("<button"));

        let switch = card(&html, "/switch/pool_pump");
        for action in ["turn_on", "turn_off", "toggle"] {
            assert!(switch.contains(&format!("data-action=\"{}\"", action)));
        }

        assert!(card(&html, "/button/restart").contains("data-action=\"press\""));
        let cover = card(&html, "/cover/pool_cover");
        for action in ["open", "close", "stop"] {
            assert!(cover.contains(&format!("data-action=\"{}\"", action)));
        }
        let lock = card(&html, "/lock/gate");
        assert!(lock.contains("data-action=\"lock\""));
        assert!(lock.contains("data-action=\"unlock\""));

        assert!(card(&html, "/number/chlorine").contains("type=\"number\""));
        assert!(card(&html, "/climate/heater").contains("data-set=\"value\""));
        assert!(card(&html, "/text/label").contains("type=\"text\""));

        let time = card(&html, "/time/start");
        assert!(time.contains("type=\"time\""));
        assert!(time.contains("data-set=\"time\""));

        let select = card(&html, "/select/mode");
        assert!(select.contains("<option value=\"auto\">auto</option>"));
        assert!(select
            .contains("<option value=\"&quot;service&quot;\">&quot;service&quot;</option>"));
    }

    #[test]
    fn test_refresh_controller() {
        let html = render("Pool Controller", &endpoints()).unwrap();
        assert!(html.contains("id=\"refresh-all\""));
        assert!(html.contains("aria-pressed=\"false\">Auto refresh: off"));
        assert!(html.contains("const REFRESH_INTERVAL_MS = 5000;"));
        assert!(html.contains("state: 'Idle'"));
        assert!(html.contains("from './api.js'"));
    }

    #[test]
    fn test_embedded_entities() {
        let html = render("Pool Controller", &endpoints()).unwrap();
        let start = html.find("type=\"application/json\">").unwrap() + 24;
        let end = start + html[start..].find("</script>").unwrap();
        let entities: serde_json::Value = serde_json::from_str(&html[start..end]).unwrap();

        let entities = entities.as_array().unwrap();
        assert_eq!(entities.len(), 10);
        assert_eq!(entities[0]["path"], "/sensor/water_temperature");
        assert_eq!(entities[0]["entity_name"], "Water <Temp>");
        assert_eq!(entities[1]["actions"][2], "toggle");
    }

    #[test]
    fn test_escapes_device_name() {
        let html = render("<script>alert(1)</script>", &[]).unwrap();
        assert!(html.contains("<h1>&lt;script&gt;alert(1)&lt;/script&gt;</h1>"));
        assert!(html.contains("no REST endpoints"));
    }
}
