//! The single upload page served at `/`.

pub const INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>AI_Radiograph</title>
<style>
  body { font-family: system-ui, sans-serif; background: #f0f2f6; margin: 0; }
  main { max-width: 720px; margin: 40px auto; padding: 0 16px; }
  h1 { color: #1f77b4; text-align: center; }
  .lead { text-align: center; color: #555; }
  form { display: flex; gap: 12px; justify-content: center; margin: 24px 0; }
  button { background: #1f77b4; color: #fff; border: none; border-radius: 8px; padding: 10px 20px; font-size: 16px; }
  button:disabled { opacity: 0.6; }
  #preview { display: none; max-width: 100%; border-radius: 10px; margin: 20px 0; }
  #status { text-align: center; }
  #status.error { color: #c62828; }
  #status.success { color: #2ca02c; }
  #result { display: none; background: #fff; border-radius: 10px; padding: 20px; white-space: pre-wrap; }
</style>
</head>
<body>
<main>
  <h1>Pathology Diagnosis with AI</h1>
  <p class="lead">Upload an image to diagnose potential pathology using advanced AI.</p>
  <form id="upload">
    <input type="file" name="image" accept=".jpg,.jpeg,.png,image/jpeg,image/png" required>
    <button type="submit">Analyze</button>
  </form>
  <img id="preview" alt="Uploaded image">
  <p id="status"></p>
  <div id="result"></div>
</main>
<script>
  const form = document.getElementById('upload');
  const input = form.querySelector('input[type=file]');
  const button = form.querySelector('button');
  const preview = document.getElementById('preview');
  const status = document.getElementById('status');
  const result = document.getElementById('result');

  input.addEventListener('change', () => {
    const file = input.files[0];
    if (!file) return;
    preview.src = URL.createObjectURL(file);
    preview.style.display = 'block';
    result.style.display = 'none';
    status.textContent = '';
    status.className = '';
  });

  form.addEventListener('submit', async (event) => {
    event.preventDefault();
    const file = input.files[0];
    if (!file) return;

    const body = new FormData();
    body.append('image', file);
    button.disabled = true;
    result.style.display = 'none';
    status.className = '';
    status.textContent = 'Analyzing image. Please wait...';

    try {
      const response = await fetch('/diagnose', { method: 'POST', body });
      const report = await response.json();
      if (report.status === 'success') {
        status.className = 'success';
        status.textContent = report.message;
        result.textContent = report.diagnosis;
        result.style.display = 'block';
      } else {
        status.className = 'error';
        status.textContent = report.message;
      }
    } catch (err) {
      status.className = 'error';
      status.textContent = 'An error occurred: ' + err.message;
    } finally {
      button.disabled = false;
    }
  });
</script>
</body>
</html>
"#;
