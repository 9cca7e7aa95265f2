use crate::cart::CartViewModel;
use crate::models::{LineView, Notice};
use crate::ui_state::{Theme, UiView};
use chrono::NaiveDate;

pub fn render_cart(cart: &CartViewModel, ui: &UiView, notice: Option<&Notice>, today: NaiveDate) -> String {
    let response = cart.response(today, None);
    let rows = if response.lines.is_empty() {
        EMPTY_ROW.to_string()
    } else {
        response.lines.iter().map(render_row).collect::<Vec<_>>().join("\n")
    };
    let totals = &response.totals;
    let badge = totals.badge.as_deref();

    INDEX_HTML
        .replace("{{THEME}}", ui.theme.as_str())
        .replace("{{THEME_CHECKED}}", if ui.theme == Theme::Dark { "checked" } else { "" })
        .replace("{{CHAT_HIDDEN}}", if ui.chat_open { "" } else { "hidden" })
        .replace("{{BADGE}}", &escape_html(badge.unwrap_or("")))
        .replace("{{BADGE_HIDDEN}}", if badge.is_some() { "" } else { "hidden" })
        .replace("{{SUBTOTAL}}", &escape_html(&totals.subtotal_display))
        .replace("{{DISCOUNT_VALUE}}", &totals.discount.to_string())
        .replace("{{DISCOUNT}}", &escape_html(&totals.discount_display))
        .replace("{{TOTAL}}", &escape_html(&totals.total_display))
        .replace("{{STATUS_LEVEL}}", notice.map(|notice| notice.level.as_str()).unwrap_or(""))
        .replace("{{STATUS}}", &escape_html(notice.map(|notice| notice.message.as_str()).unwrap_or("")))
        .replace("{{EMPTY_ROW}}", EMPTY_ROW)
        .replace("{{ROWS}}", &rows)
}

fn render_row(line: &LineView) -> String {
    let (row_class, expiry_note) = match &line.expiry {
        Some(info) => (
            info.row_class(),
            format!(
                r#"<span class="expiry" data-days-left="{}">expires {}</span>"#,
                info.days_left, info.date
            ),
        ),
        None => ("", String::new()),
    };

    format!(
        r#"<tr class="cart-item {row_class}" data-line-id="{id}">
          <td><span class="name">{name}</span>{expiry_note}</td>
          <td class="price">{price}</td>
          <td>
            <form class="quantity-form" method="post" action="/cart/update/{id}">
              <div class="quantity">
                <button type="button" class="quantity-btn-decrease" aria-label="Decrease">-</button>
                <input class="quantity-input" name="quantity" type="text" inputmode="numeric" value="{quantity}" />
                <button type="button" class="quantity-btn-increase" aria-label="Increase">+</button>
              </div>
              <input type="hidden" name="current_quantity" value="{submit}" />
              <button type="submit" class="quantity-update">Update</button>
            </form>
          </td>
          <td class="cart-item-subtotal">{subtotal}</td>
          <td><button type="button" class="remove-btn">Remove</button></td>
        </tr>"#,
        id = line.id,
        name = escape_html(&line.name),
        price = escape_html(&line.unit_price_display),
        quantity = line.quantity,
        submit = line.submit_quantity,
        subtotal = escape_html(&line.subtotal_display),
    )
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

const EMPTY_ROW: &str = r#"<tr class="empty"><td colspan="5">Your cart is empty.</td></tr>"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en" data-theme="{{THEME}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Your Cart</title>
  <style>
    :root {
      --bg: #f8f3e6;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
    }

    [data-theme="dark"] {
      --bg: #1d2126;
      --ink: #ece7df;
      --card: rgba(40, 44, 52, 0.95);
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      border-radius: 24px;
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .badge {
      background: var(--accent);
      color: white;
      border-radius: 999px;
      padding: 2px 10px;
      font-size: 0.85rem;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    td, th {
      padding: 10px 8px;
      text-align: left;
      border-bottom: 1px solid rgba(47, 72, 88, 0.12);
    }

    .table-warning {
      background: rgba(255, 193, 7, 0.18);
    }

    .table-danger {
      background: rgba(220, 53, 69, 0.18);
    }

    .expiry {
      display: block;
      font-size: 0.8rem;
      color: #8b857d;
    }

    .quantity {
      display: inline-flex;
      gap: 4px;
    }

    .quantity-input {
      width: 3.5em;
      text-align: center;
    }

    .totals {
      display: grid;
      gap: 6px;
      justify-content: end;
      text-align: right;
    }

    .totals .total {
      font-size: 1.4rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .status {
      min-height: 1.2em;
    }

    .status[data-level="warning"] {
      color: #a86b00;
    }

    .status[data-level="danger"] {
      color: #c63b2b;
    }

    .status[data-level="info"] {
      color: #2d7a4b;
    }

    .chat-panel {
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 16px;
      padding: 16px;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Your Cart <span class="badge" id="cart-badge" {{BADGE_HIDDEN}}>{{BADGE}}</span></h1>
      <label><input type="checkbox" id="theme-toggle" {{THEME_CHECKED}} /> Dark mode</label>
    </header>

    <div class="status" id="status" role="status" data-level="{{STATUS_LEVEL}}">{{STATUS}}</div>

    <table>
      <thead>
        <tr><th>Product</th><th>Price</th><th>Quantity</th><th>Subtotal</th><th></th></tr>
      </thead>
      <tbody id="cart-lines">
{{ROWS}}
      </tbody>
    </table>
    <template id="empty-row">{{EMPTY_ROW}}</template>

    <section class="totals">
      <div>Subtotal: <span id="cart-subtotal">{{SUBTOTAL}}</span></div>
      <div>Discount: <span id="cart-discount" data-value="{{DISCOUNT_VALUE}}">{{DISCOUNT}}</span></div>
      <div class="total">Total: <span id="cart-total">{{TOTAL}}</span></div>
    </section>

    <form id="coupon-form">
      <input type="text" name="coupon_code" placeholder="Coupon code" />
      <button type="submit">Apply</button>
    </form>

    <button type="button" id="chat-toggle">Chat</button>
    <section class="chat-panel" id="chat-panel" {{CHAT_HIDDEN}}>
      <p>Ask us anything about your order.</p>
    </section>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const linesEl = document.getElementById('cart-lines');

    const setStatus = (notice) => {
      statusEl.textContent = notice ? notice.message : '';
      statusEl.dataset.level = notice ? notice.level : '';
    };

    const post = async (url, body) => {
      const res = await fetch(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body || {})
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const paintCart = (cart) => {
      const seen = new Set();
      cart.lines.forEach((line) => {
        seen.add(String(line.id));
        const row = linesEl.querySelector(`[data-line-id="${line.id}"]`);
        if (!row) {
          return;
        }
        row.querySelector('.quantity-input').value = line.quantity;
        row.querySelector('input[name="current_quantity"]').value = line.submit_quantity;
        row.querySelector('.cart-item-subtotal').textContent = line.subtotal_display;
      });
      linesEl.querySelectorAll('.cart-item').forEach((row) => {
        if (!seen.has(row.dataset.lineId)) {
          row.remove();
        }
      });
      if (cart.lines.length === 0 && !linesEl.querySelector('.empty')) {
        linesEl.appendChild(document.getElementById('empty-row').content.cloneNode(true));
      }

      document.getElementById('cart-subtotal').textContent = cart.totals.subtotal_display;
      document.getElementById('cart-discount').textContent = cart.totals.discount_display;
      document.getElementById('cart-total').textContent = cart.totals.total_display;

      const badge = document.getElementById('cart-badge');
      badge.hidden = !cart.totals.badge;
      badge.textContent = cart.totals.badge || '';

      setStatus(cart.notice);
    };

    const lineUrl = (row, action) => `/api/cart/lines/${row.dataset.lineId}/${action}`;
    const fail = (err) => setStatus({ level: 'danger', message: err.message });

    linesEl.addEventListener('click', (event) => {
      const row = event.target.closest('.cart-item');
      if (!row) {
        return;
      }
      if (event.target.matches('.quantity-btn-decrease')) {
        post(lineUrl(row, 'adjust'), { delta: -1 }).then(paintCart).catch(fail);
      } else if (event.target.matches('.quantity-btn-increase')) {
        post(lineUrl(row, 'adjust'), { delta: 1 }).then(paintCart).catch(fail);
      } else if (event.target.matches('.remove-btn')) {
        post(lineUrl(row, 'remove'), { confirmed: false })
          .then((result) => {
            if (result.status === 'needs_confirmation' && window.confirm(result.prompt)) {
              return post(lineUrl(row, 'remove'), { confirmed: true });
            }
            return null;
          })
          .then((result) => {
            if (result && result.status === 'removed') {
              paintCart(result.cart);
            }
          })
          .catch(fail);
      }
    });

    const sendQuantity = (row) => {
      const value = row.querySelector('.quantity-input').value;
      post(lineUrl(row, 'quantity'), { value }).then(paintCart).catch(fail);
    };

    linesEl.addEventListener('change', (event) => {
      if (event.target.matches('.quantity-input')) {
        sendQuantity(event.target.closest('.cart-item'));
      }
    });

    linesEl.addEventListener('submit', (event) => {
      event.preventDefault();
      sendQuantity(event.target.closest('.cart-item'));
    });

    document.getElementById('coupon-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const code = event.target.querySelector('input[name="coupon_code"]').value;
      post('/api/cart/coupon', { code })
        .then((result) => {
          if (result.status === 'rejected') {
            setStatus(result.notice);
          } else {
            setStatus({ level: 'info', message: `Coupon ${result.code} submitted.` });
          }
        })
        .catch(fail);
    });

    const themeToggle = document.getElementById('theme-toggle');
    themeToggle.addEventListener('change', () => {
      post('/api/ui/theme', { theme: themeToggle.checked ? 'dark' : 'light' })
        .then((ui) => {
          document.documentElement.setAttribute('data-theme', ui.theme);
          themeToggle.checked = ui.theme === 'dark';
        })
        .catch(fail);
    });

    document.getElementById('chat-toggle').addEventListener('click', () => {
      post('/api/ui/chat')
        .then((ui) => {
          document.getElementById('chat-panel').hidden = !ui.chat_open;
        })
        .catch(fail);
    });
  </script>
</body>
</html>
"#;
