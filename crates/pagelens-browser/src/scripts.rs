//! In-page collectors evaluated against the navigated page.
//!
//! Every script is a single expression returning a JSON object shaped like
//! the matching snapshot type in `pagelens_core::snapshot`.

use pagelens_core::snapshot::SelectorGroup;

pub const FONTS: &str = r#"(() => {
  const families = new Set();
  for (const el of document.querySelectorAll('body, body *')) {
    const family = getComputedStyle(el).fontFamily;
    if (family && family.trim()) families.add(family.trim());
  }
  return { families: Array.from(families) };
})()"#;

pub const IMAGES: &str = r#"(() => ({
  images: Array.from(document.images).map((img) => {
    const rect = img.getBoundingClientRect();
    return {
      src: img.currentSrc || img.getAttribute('src') || '',
      alt: img.hasAttribute('alt') ? img.getAttribute('alt') : null,
      naturalWidth: img.naturalWidth || 0,
      naturalHeight: img.naturalHeight || 0,
      renderedWidth: rect.width,
      renderedHeight: rect.height,
    };
  }),
}))()"#;

pub const LAYOUT: &str = r#"(() => {
  const vw = window.innerWidth;
  const vh = window.innerHeight;
  const mediaTags = new Set(['IMG', 'SVG', 'VIDEO', 'CANVAS', 'PICTURE', 'IFRAME',
    'BUTTON', 'INPUT', 'SELECT', 'TEXTAREA']);
  const ownText = (el) => Array.from(el.childNodes)
    .some((n) => n.nodeType === Node.TEXT_NODE && n.textContent.trim().length > 0);
  const isContent = (el) => mediaTags.has(el.tagName.toUpperCase()) || ownText(el);

  const cols = 24;
  const rows = 16;
  let background = 0;
  for (let r = 0; r < rows; r++) {
    for (let c = 0; c < cols; c++) {
      const el = document.elementFromPoint((c + 0.5) * vw / cols, (r + 0.5) * vh / rows);
      if (!el || el === document.body || el === document.documentElement || !isContent(el)) {
        background++;
      }
    }
  }

  let inFold = 0;
  let ratioSum = 0;
  let ratioCount = 0;
  for (const el of document.querySelectorAll('body *')) {
    if (!isContent(el)) continue;
    const rect = el.getBoundingClientRect();
    if (rect.width === 0 || rect.height === 0) continue;
    if (rect.top < vh && rect.bottom > 0) inFold++;
    if (ratioCount < 500 && ownText(el)) {
      const style = getComputedStyle(el);
      const fontSize = parseFloat(style.fontSize);
      if (fontSize > 0) {
        const lh = style.lineHeight === 'normal' ? 1.2 : parseFloat(style.lineHeight) / fontSize;
        if (Number.isFinite(lh)) {
          ratioSum += lh;
          ratioCount++;
        }
      }
    }
  }

  const area = vw * vh;
  return {
    elementCount: document.querySelectorAll('body *').length,
    viewportWidth: vw,
    viewportHeight: vh,
    whitespaceRatio: background / (cols * rows),
    contentDensity: area > 0 ? inFold / (area / 10000) : 0,
    avgLineHeight: ratioCount > 0 ? ratioSum / ratioCount : 0,
  };
})()"#;

const CTA: &str = r#"((selectors) => {
  const seen = new Set();
  const candidates = [];
  for (const selector of selectors) {
    let nodes;
    try {
      nodes = document.querySelectorAll(selector);
    } catch (e) {
      continue;
    }
    for (const el of nodes) {
      if (seen.has(el)) continue;
      seen.add(el);
      const rect = el.getBoundingClientRect();
      const style = getComputedStyle(el);
      const visible = rect.width > 0 && rect.height > 0
        && style.visibility !== 'hidden' && style.display !== 'none';
      const text = (el.innerText || el.value || el.getAttribute('aria-label') || '').trim();
      candidates.push({
        text,
        tag: el.tagName.toLowerCase(),
        href: el.getAttribute('href'),
        className: typeof el.className === 'string' ? el.className : '',
        top: rect.top + window.scrollY,
        visible,
      });
    }
  }
  return { candidates, viewportHeight: window.innerHeight };
})(__SELECTORS__)"#;

/// Whole class token that marks a rating widget; `get-started` does not match
pub const RATING_CLASS_TOKEN: &str =
    r"^(?:stars?|ratings?|star-rating|rating-stars?|[a-z0-9]+-(?:stars?|rating))$";

const SOCIAL_PROOF: &str = r#"((groups, ratingToken) => {
  const token = new RegExp(ratingToken, 'i');
  const isRating = (node) =>
    node.matches('[itemprop="ratingValue"], [data-rating], [aria-label*=" stars" i], [aria-label*="out of 5" i]')
    || Array.from(node.classList || []).some((c) => token.test(c));
  // The matched element never counts as its own indicator
  const nearbyRating = (el) => {
    const scope = el.parentElement || el;
    for (const node of scope.querySelectorAll('*')) {
      if (node !== el && isRating(node)) return true;
    }
    return false;
  };
  const candidates = [];
  for (const group of groups) {
    for (const selector of group.selectors) {
      let nodes;
      try {
        nodes = document.querySelectorAll(selector);
      } catch (e) {
        continue;
      }
      for (const el of nodes) {
        const text = (el.innerText || el.getAttribute('alt') || '').trim().slice(0, 600);
        if (!text) continue;
        const hasRatingIndicator = /[★⭐]/.test(text) || nearbyRating(el);
        candidates.push({
          kind: group.kind,
          text,
          className: typeof el.className === 'string' ? el.className : '',
          selector,
          hasRatingIndicator,
        });
      }
    }
  }
  return { candidates };
})(__GROUPS__, __RATING_TOKEN__)"#;

pub fn cta(selectors: &[&str]) -> pagelens_core::Result<String> {
    Ok(CTA.replace("__SELECTORS__", &serde_json::to_string(selectors)?))
}

pub fn social_proof(groups: &[SelectorGroup]) -> pagelens_core::Result<String> {
    Ok(SOCIAL_PROOF
        .replace("__GROUPS__", &serde_json::to_string(groups)?)
        .replace("__RATING_TOKEN__", &serde_json::to_string(RATING_CLASS_TOKEN)?))
}
