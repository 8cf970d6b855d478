pub const SITE_CSS: &str = r#"
:root {
    --primary: #0f766e;
    --primary-focus: #115e59;
    --base-100: #ffffff;
    --base-200: #f8f9fa;
    --base-content: #1f2937;
    --muted: #6b7280;
}
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    line-height: 1.6;
    color: var(--base-content);
    background: var(--base-100);
}
a { color: var(--primary); }
.container { max-width: 960px; margin: 0 auto; padding: 2rem 1rem; }
.site-header {
    display: flex;
    gap: 1.5rem;
    align-items: center;
    padding: 1rem;
    border-bottom: 1px solid #e5e7eb;
}
.brand { font-weight: 700; text-decoration: none; display: flex; gap: .5rem; align-items: center; }
.logo { height: 32px; }
.main-nav ul { list-style: none; display: flex; gap: 1rem; }
.main-nav li { position: relative; }
.main-nav .dropdown { display: none; position: absolute; background: var(--base-100); padding: .5rem; flex-direction: column; }
.main-nav .has-children:hover .dropdown { display: flex; }
.nav-icon { height: 16px; vertical-align: middle; }
.search-box { margin-left: auto; position: relative; }
.search-results { position: absolute; right: 0; width: 320px; background: var(--base-100); border: 1px solid #e5e7eb; z-index: 10; }
.search-results a { display: block; padding: .5rem; }
.post-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1.5rem; }
.post-card { background: var(--base-200); border-radius: 8px; overflow: hidden; }
.post-card img { width: 100%; height: 160px; object-fit: cover; }
.post-card .card-body { padding: 1rem; }
.badge { background: var(--primary); color: #fff; padding: .1rem .6rem; border-radius: 999px; font-size: .8rem; text-decoration: none; }
.byline, .meta { color: var(--muted); font-size: .9rem; }
.featured { width: 100%; border-radius: 8px; margin: 1rem 0; }
.content { margin: 1.5rem 0; }
.content p { margin-bottom: 1rem; }
.comment { border-left: 3px solid #e5e7eb; padding-left: 1rem; margin: 1rem 0; }
.comment .replies { margin-left: 1rem; }
.rating .stars { color: #f59e0b; }
form.js-form { display: grid; gap: .75rem; max-width: 560px; }
form.js-form input, form.js-form textarea { padding: .5rem; border: 1px solid #d1d5db; border-radius: 4px; }
form.js-form button { background: var(--primary); color: #fff; border: 0; padding: .6rem 1rem; border-radius: 4px; cursor: pointer; }
.form-message.error { color: #b91c1c; }
.form-message.success { color: var(--primary); }
.site-footer { background: var(--base-200); padding: 2rem 1rem; margin-top: 3rem; text-align: center; }
.site-footer form.js-form { margin: 1rem auto; }
.empty { color: var(--muted); font-style: italic; }
"#;

pub const SITE_JS: &str = r#"
(function () {
    const input = document.getElementById('search-input');
    const results = document.getElementById('search-results');
    let timer = null;

    function plain(markup) {
        return new DOMParser().parseFromString(markup, 'text/html').body.textContent || '';
    }

    if (input && results) {
        input.addEventListener('input', () => {
            clearTimeout(timer);
            const term = input.value.trim();
            if (!term) {
                results.hidden = true;
                results.replaceChildren();
                return;
            }
            timer = setTimeout(async () => {
                const res = await fetch('/api/search?term=' + encodeURIComponent(term));
                const data = await res.json();
                results.replaceChildren();
                for (const post of data.posts || []) {
                    const a = document.createElement('a');
                    a.href = '/' + post.slug;
                    a.textContent = plain(post.title.rendered);
                    results.appendChild(a);
                }
                if (!results.children.length) {
                    const p = document.createElement('p');
                    p.className = 'empty';
                    p.textContent = 'No articles found.';
                    results.appendChild(p);
                }
                results.hidden = false;
            }, 300);
        });
        input.addEventListener('keydown', (e) => {
            if (e.key === 'Enter' && input.value.trim()) {
                location.href = '/search?q=' + encodeURIComponent(input.value.trim());
            }
        });
    }

    document.querySelectorAll('form.js-form').forEach((form) => {
        form.addEventListener('submit', async (e) => {
            e.preventDefault();
            const body = {};
            for (const el of form.elements) {
                if (!el.name || (el.type === 'radio' && !el.checked)) continue;
                body[el.name] = el.dataset.number !== undefined ? Number(el.value) : el.value;
            }
            const message = form.querySelector('.form-message');
            const button = form.querySelector('button[type=submit]');
            if (button) button.disabled = true;
            try {
                const res = await fetch(form.dataset.endpoint, {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify(body),
                });
                const data = await res.json();
                if (message) {
                    message.textContent = data.message || '';
                    message.className = 'form-message ' + (res.ok ? 'success' : 'error');
                }
                if (res.ok) {
                    if (data.html) insertComment(body.parent || 0, data.html);
                    form.reset();
                }
            } catch (err) {
                if (message) {
                    message.textContent = 'Something went wrong. Please try again.';
                    message.className = 'form-message error';
                }
            } finally {
                if (button) button.disabled = false;
            }
        });
    });

    function insertComment(parent, html) {
        const tpl = document.createElement('template');
        tpl.innerHTML = html.trim();
        const node = tpl.content.firstElementChild;
        if (!node) return;
        if (parent) {
            const replies = document.querySelector('#comment-' + parent + ' > .replies');
            if (replies) replies.appendChild(node);
        } else {
            const list = document.getElementById('comment-list');
            if (list) list.prepend(node);
        }
    }
})();
"#;
